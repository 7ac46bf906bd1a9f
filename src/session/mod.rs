// src/session/mod.rs

//! Test-taking sessions.
//!
//! [`TestSession`] is the per-attempt state machine (`in_progress` ->
//! `submitted`); [`manager::SessionManager`] owns the active sessions and the
//! countdown task driving each of them.

pub mod manager;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    config::OPTION_COUNT,
    error::AppError,
    models::{
        session::{QuestionStatus, SessionStatus, SessionView, Submission},
        test::Test,
    },
    store::{Completion, Store},
    utils::format::format_countdown,
};

pub use manager::SessionManager;

/// Placeholder score: share of answered questions, rounded down.
/// Correctness is not checked.
pub fn placeholder_score(answered: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((100 * u64::from(answered.min(total))) / u64::from(total)) as u8
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { remaining: u64 },
    /// The countdown hit zero; the caller must submit.
    Expired,
    /// The session is already submitted; nothing to do.
    Finished,
}

#[derive(Debug)]
pub struct TestSession {
    test_id: Uuid,
    title: String,
    total_questions: u32,
    current: u32,
    answers: Vec<Option<u8>>,
    marked_for_review: Vec<bool>,
    remaining_seconds: u64,
    submission: Option<Submission>,
}

impl TestSession {
    /// Fresh attempt with one answer slot and one review flag per question and
    /// the countdown set to the test duration.
    pub fn start(test: &Test) -> Self {
        let n = test.total_questions as usize;
        Self {
            test_id: test.id,
            title: test.title.clone(),
            total_questions: test.total_questions,
            current: 0,
            answers: vec![None; n],
            marked_for_review: vec![false; n],
            remaining_seconds: u64::from(test.duration) * 60,
            submission: None,
        }
    }

    pub fn test_id(&self) -> Uuid {
        self.test_id
    }

    pub fn status(&self) -> SessionStatus {
        if self.submission.is_some() {
            SessionStatus::Submitted
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    pub fn marked_for_review(&self) -> &[bool] {
        &self.marked_for_review
    }

    pub fn current_question(&self) -> u32 {
        self.current
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn answered_count(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_some()).count() as u32
    }

    fn ensure_in_progress(&self) -> Result<(), AppError> {
        if self.submission.is_some() {
            return Err(AppError::Conflict("Test already submitted".to_string()));
        }
        Ok(())
    }

    fn slot(&self, question: u32) -> Result<usize, AppError> {
        if question >= self.total_questions {
            return Err(AppError::BadRequest(format!(
                "Question {} is out of range (test has {} questions)",
                question, self.total_questions
            )));
        }
        Ok(question as usize)
    }

    /// Records `option` for `question`, replacing any earlier choice.
    pub fn select_answer(&mut self, question: u32, option: u8) -> Result<(), AppError> {
        self.ensure_in_progress()?;
        let slot = self.slot(question)?;
        if option >= OPTION_COUNT {
            return Err(AppError::BadRequest(format!(
                "Option must be between 0 and {}",
                OPTION_COUNT - 1
            )));
        }
        self.answers[slot] = Some(option);
        Ok(())
    }

    /// Flips the review flag and returns its new value. No effect on scoring.
    pub fn toggle_review(&mut self, question: u32) -> Result<bool, AppError> {
        self.ensure_in_progress()?;
        let slot = self.slot(question)?;
        self.marked_for_review[slot] = !self.marked_for_review[slot];
        Ok(self.marked_for_review[slot])
    }

    pub fn go_to(&mut self, question: u32) -> u32 {
        self.current = question.min(self.total_questions.saturating_sub(1));
        self.current
    }

    pub fn next(&mut self) -> u32 {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> u32 {
        self.go_to(self.current.saturating_sub(1))
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.submission.is_some() {
            return Tick::Finished;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining_seconds,
            }
        }
    }

    /// Terminal transition. Computes the placeholder score and writes it onto
    /// the test. Calling it again returns the first result.
    pub fn submit(&mut self, store: &mut Store, now: DateTime<Utc>) -> Result<Submission, AppError> {
        if let Some(submission) = &self.submission {
            return Ok(submission.clone());
        }

        let score = placeholder_score(self.answered_count(), self.total_questions);
        let (score, completed_at) = match store.complete_test(self.test_id, score, now) {
            Some(Completion::Recorded { score, completed_at }) => (score, completed_at),
            Some(Completion::AlreadyCompleted { score, completed_at }) => {
                tracing::warn!("Test {} was already completed, keeping score {}", self.test_id, score);
                (score, completed_at)
            }
            None => return Err(AppError::TestNotFound(self.test_id)),
        };

        let submission = Submission {
            test_id: self.test_id,
            score,
            total_questions: self.total_questions,
            completed_at,
            redirect: format!("/analysis/{}", self.test_id),
        };
        self.submission = Some(submission.clone());
        Ok(submission)
    }

    fn question_status(&self, index: usize) -> QuestionStatus {
        if index == self.current as usize {
            QuestionStatus::Current
        } else if self.answers[index].is_some() {
            QuestionStatus::Answered
        } else if self.marked_for_review[index] {
            QuestionStatus::MarkedForReview
        } else {
            QuestionStatus::Unanswered
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            test_id: self.test_id,
            title: self.title.clone(),
            status: self.status(),
            total_questions: self.total_questions,
            current_question: self.current,
            answers: self.answers.clone(),
            marked_for_review: self.marked_for_review.clone(),
            palette: (0..self.answers.len()).map(|i| self.question_status(i)).collect(),
            answered_count: self.answered_count(),
            remaining_seconds: self.remaining_seconds,
            remaining_display: format_countdown(self.remaining_seconds),
        }
    }
}
