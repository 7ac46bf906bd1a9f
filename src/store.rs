// src/store.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    achievement::Achievement,
    test::{Subject, Test},
    user::{StatsUpdate, User, UserStats},
};

/// Handle shared by every handler. Writers take the lock for the whole
/// mutation, so readers never observe a half-applied update.
pub type SharedStore = Arc<RwLock<Store>>;

/// Outcome of [`Store::complete_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The score was written by this call.
    Recorded { score: u8, completed_at: DateTime<Utc> },
    /// The test already had a score; nothing changed.
    AlreadyCompleted { score: u8, completed_at: DateTime<Utc> },
}

/// In-memory application state. Lives as long as the process.
#[derive(Debug, Default)]
pub struct Store {
    user: Option<User>,
    tests: Vec<Test>,
    stats: UserStats,
    achievements: Vec<Achievement>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn add_test(&mut self, test: Test) {
        tracing::debug!("Storing test {} ({})", test.id, test.title);
        self.tests.push(test);
    }

    pub fn find_test(&self, id: Uuid) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == id)
    }

    /// Writes the score and completion time onto a test.
    ///
    /// A score is final: if the test was already completed the stored values
    /// are returned untouched. Returns `None` when no test has this id.
    pub fn complete_test(
        &mut self,
        id: Uuid,
        score: u8,
        completed_at: DateTime<Utc>,
    ) -> Option<Completion> {
        let test = self.tests.iter_mut().find(|t| t.id == id)?;

        if let (Some(score), Some(completed_at)) = (test.score, test.completed_at) {
            return Some(Completion::AlreadyCompleted { score, completed_at });
        }

        test.score = Some(score);
        test.completed_at = Some(completed_at);
        tracing::info!("Test {} completed with score {}", id, score);

        Some(Completion::Recorded { score, completed_at })
    }

    /// All tests in creation (insertion) order.
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Tests newest first. Tests created at the same instant keep the
    /// later-inserted one first.
    pub fn history(&self) -> Vec<&Test> {
        let mut tests: Vec<&Test> = self.tests.iter().rev().collect();
        tests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tests
    }

    /// The most recently added test, if any.
    pub fn latest_test(&self) -> Option<&Test> {
        self.tests.last()
    }

    /// Stored counters with the totals recomputed from completed tests.
    ///
    /// `total_tests`, `average_score` and `subjects_completed` are derived;
    /// streaks, points and level only change through [`Store::update_stats`].
    pub fn stats(&self) -> UserStats {
        let scores: Vec<u32> = self
            .tests
            .iter()
            .filter_map(|t| t.score.map(u32::from))
            .collect();

        let mut subjects: Vec<Subject> = Vec::new();
        for test in self.tests.iter().filter(|t| t.is_completed()) {
            if !subjects.contains(&test.subject) {
                subjects.push(test.subject);
            }
        }

        let mut stats = self.stats.clone();
        stats.total_tests = scores.len() as u32;
        stats.average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<u32>() as f64 / scores.len() as f64
        };
        stats.subjects_completed = subjects.iter().map(|s| s.as_str().to_string()).collect();
        stats
    }

    pub fn update_stats(&mut self, update: StatsUpdate) {
        self.stats.apply(update);
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Appends an achievement. Returns `false` if one with the same id was
    /// already unlocked.
    pub fn unlock_achievement(&mut self, mut achievement: Achievement) -> bool {
        if self.achievements.iter().any(|a| a.id == achievement.id) {
            return false;
        }
        if achievement.unlocked_at.is_none() {
            achievement.unlocked_at = Some(Utc::now());
        }
        tracing::info!("Achievement unlocked: {}", achievement.id);
        self.achievements.push(achievement);
        true
    }
}
