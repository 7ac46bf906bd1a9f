// src/models/achievement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Achievement {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 500))]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub unlocked_at: Option<DateTime<Utc>>,

    /// Completion percentage for achievements that build up over time.
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress: Option<f64>,
}
