// src/handlers/history.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        analysis::{AnalysisView, ProgressPoint, QuestionReview, Recommendations, TopicPerformance},
        test::{Test, TestSummary},
    },
    store::{SharedStore, Store},
    utils::format::format_date,
};

/// Lists every test, newest first.
pub async fn list_tests(State(store): State<SharedStore>) -> impl IntoResponse {
    let store = store.read().await;
    let history: Vec<TestSummary> = store.history().into_iter().map(TestSummary::from).collect();
    Json(history)
}

/// Analysis page for one test.
pub async fn get_analysis(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let store = store.read().await;
    let test = store.find_test(id).ok_or(AppError::TestNotFound(id))?;
    Ok(Json(build_analysis(&store, test)))
}

/// Scores of the completed tests sharing `test`'s subject, in creation order.
fn progress_for(store: &Store, test: &Test) -> Vec<ProgressPoint> {
    store
        .tests()
        .iter()
        .filter(|t| t.subject == test.subject)
        .filter_map(|t| {
            t.score.map(|score| ProgressPoint {
                date: format_date(t.created_at),
                score,
            })
        })
        .collect()
}

fn build_analysis(store: &Store, test: &Test) -> AnalysisView {
    AnalysisView {
        id: test.id,
        title: test.title.clone(),
        subject: test.subject,
        difficulty: test.difficulty,
        date: format_date(test.created_at),
        score: test.score,
        duration: test.duration,
        total_questions: test.total_questions,
        topic_performance: sample_topic_performance(),
        progress: progress_for(store, test),
        question_review: sample_question_review(),
        recommendations: sample_recommendations(),
        sample_data: true,
    }
}

// Generated questions are never graded, so there is nothing per-topic or
// per-question to derive. These fixed values fill the charts.

fn sample_topic_performance() -> Vec<TopicPerformance> {
    vec![
        TopicPerformance { name: "Mechanics", correct: 8, total: 10 },
        TopicPerformance { name: "Thermodynamics", correct: 6, total: 8 },
        TopicPerformance { name: "Optics", correct: 7, total: 9 },
    ]
}

fn sample_question_review() -> Vec<QuestionReview> {
    (0..3)
        .map(|i| QuestionReview {
            number: i + 1,
            correct: i % 2 == 0,
            question: "Sample question text for analysis...",
            explanation: "Detailed explanation of the correct answer and solution approach...",
        })
        .collect()
}

fn sample_recommendations() -> Recommendations {
    Recommendations {
        strengths: vec!["Mechanics concepts", "Problem-solving speed"],
        improvements: vec!["Thermodynamics formulas", "Time management"],
    }
}
