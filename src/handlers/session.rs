// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::session::{NavigateRequest, SelectAnswerRequest},
    session::SessionManager,
};

/// Opens the take-test view. Unknown ids answer 404 with a redirect home.
pub async fn start_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let view = sessions.start(id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.view(id).await?))
}

/// Leaves the view without submitting.
pub async fn abandon_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    sessions.abandon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn select_answer(
    State(sessions): State<Arc<SessionManager>>,
    Path((id, question)): Path<(Uuid, u32)>,
    Json(req): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.select_answer(id, question, req.option).await?))
}

pub async fn toggle_review(
    State(sessions): State<Arc<SessionManager>>,
    Path((id, question)): Path<(Uuid, u32)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.toggle_review(id, question).await?))
}

pub async fn navigate(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
    Json(req): Json<NavigateRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.navigate(id, req).await?))
}

/// Submits the attempt and returns the score plus the analysis route.
pub async fn submit(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.submit(id).await?))
}
