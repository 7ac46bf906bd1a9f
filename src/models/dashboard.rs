// src/models/dashboard.rs

use serde::{Deserialize, Serialize};

use super::{
    achievement::Achievement,
    test::TestSummary,
    user::{User, UserStats},
};

#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// "Welcome back, {greeting_name}!"
    pub greeting_name: String,
    pub user: Option<User>,
    pub stats: UserStats,
    pub achievements: Vec<Achievement>,

    /// Most recently generated test; `None` while the store is empty.
    pub latest_test: Option<TestSummary>,
    pub motivational_message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub to: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavigationParams {
    pub path: Option<String>,
}
