// src/handlers/generator.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::{DEFAULT_DURATION, DEFAULT_QUESTION_COUNT, DURATIONS, MAX_QUESTION_COUNT},
    error::AppError,
    generator::{QuestionGenerator, Wizard, generate_test},
    models::test::{Difficulty, GenerateTestRequest, GenerateTestResponse, Subject},
    store::SharedStore,
};

/// Static choices offered by the generator wizard.
pub async fn get_options() -> impl IntoResponse {
    let subjects: Vec<_> = Subject::ALL
        .iter()
        .map(|s| {
            json!({
                "id": s,
                "name": s.display_name(),
                "chapters": s.chapters(),
            })
        })
        .collect();

    let difficulties: Vec<_> = Difficulty::ALL
        .iter()
        .map(|d| json!({ "level": d.level(), "label": d.label() }))
        .collect();

    Json(json!({
        "subjects": subjects,
        "difficulties": difficulties,
        "durations": DURATIONS,
        "default_duration": DEFAULT_DURATION,
        "default_question_count": DEFAULT_QUESTION_COUNT,
        "max_question_count": MAX_QUESTION_COUNT,
    }))
}

/// Generates a new practice test.
///
/// * Replays the selections through the wizard; incomplete input is rejected
///   before anything is sent out.
/// * Calls the text-generation service once, without retries.
/// * Appends the test to the store only if generation succeeded.
pub async fn create_test(
    State(store): State<SharedStore>,
    State(generator): State<Arc<dyn QuestionGenerator>>,
    Json(payload): Json<GenerateTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let draft = Wizard::from_request(&payload)?.finish()?;
    let test = generate_test(generator.as_ref(), draft).await?;

    store.write().await.add_test(test.clone());
    tracing::info!("Created test {} ({})", test.id, test.title);

    let next = format!("/test/{}", test.id);
    Ok((StatusCode::CREATED, Json(GenerateTestResponse { test, next })))
}
