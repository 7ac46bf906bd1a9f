// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

/// Colour of a question in the navigation palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Current,
    Answered,
    MarkedForReview,
    Unanswered,
}

/// Snapshot of a test-taking session as the client renders it.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub test_id: Uuid,
    pub title: String,
    pub status: SessionStatus,
    pub total_questions: u32,
    pub current_question: u32,
    pub answers: Vec<Option<u8>>,
    pub marked_for_review: Vec<bool>,
    pub palette: Vec<QuestionStatus>,
    pub answered_count: u32,
    pub remaining_seconds: u64,

    /// `m:ss`
    pub remaining_display: String,
}

/// Result of the terminal transition of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub test_id: Uuid,
    pub score: u8,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,

    /// Route of the analysis view the client moves to.
    pub redirect: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectAnswerRequest {
    pub option: u8,
}

/// Body of the navigation endpoint: either an absolute jump or a step.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NavigateRequest {
    GoTo { to: u32 },
    Step { action: NavigationStep },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStep {
    Next,
    Previous,
}
