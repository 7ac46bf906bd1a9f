// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The (single, local) user shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address."))]
    pub email: String,

    #[validate(url)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_tests: u32,
    pub average_score: f64,
    pub subjects_completed: Vec<String>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_points: u32,
    pub level: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_tests: 0,
            average_score: 0.0,
            subjects_completed: Vec::new(),
            current_streak: 0,
            best_streak: 0,
            total_points: 0,
            level: 1,
        }
    }
}

/// Partial stats update. Present fields overwrite the stored counters.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StatsUpdate {
    pub total_tests: Option<u32>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub average_score: Option<f64>,
    pub subjects_completed: Option<Vec<String>>,
    pub current_streak: Option<u32>,
    pub best_streak: Option<u32>,
    pub total_points: Option<u32>,
    #[validate(range(min = 1))]
    pub level: Option<u32>,
}

impl UserStats {
    pub fn apply(&mut self, update: StatsUpdate) {
        if let Some(v) = update.total_tests {
            self.total_tests = v;
        }
        if let Some(v) = update.average_score {
            self.average_score = v;
        }
        if let Some(v) = update.subjects_completed {
            self.subjects_completed = v;
        }
        if let Some(v) = update.current_streak {
            self.current_streak = v;
        }
        if let Some(v) = update.best_streak {
            self.best_streak = v;
        }
        if let Some(v) = update.total_points {
            self.total_points = v;
        }
        if let Some(v) = update.level {
            self.level = v;
        }
    }
}
