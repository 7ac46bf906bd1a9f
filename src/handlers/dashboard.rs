// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    models::{
        dashboard::{DashboardView, NavLink, NavigationParams},
        test::TestSummary,
    },
    store::SharedStore,
    utils::format::motivational_message,
};

const NAV_LINKS: [(&str, &str); 3] = [
    ("/", "Dashboard"),
    ("/generate", "New Test"),
    ("/history", "History"),
];

/// Home view: greeting, stats, achievements and the latest test.
pub async fn get_dashboard(State(store): State<SharedStore>) -> impl IntoResponse {
    let store = store.read().await;
    let user = store.user().cloned();

    Json(DashboardView {
        greeting_name: user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Student".to_string()),
        user,
        stats: store.stats(),
        achievements: store.achievements().to_vec(),
        latest_test: store.latest_test().map(TestSummary::from),
        motivational_message: motivational_message(),
    })
}

/// Links of the top navigation bar, flagging the one matching `path`.
pub async fn get_navigation(Query(params): Query<NavigationParams>) -> impl IntoResponse {
    let current = params.path.unwrap_or_else(|| "/".to_string());
    let links: Vec<NavLink> = NAV_LINKS
        .iter()
        .map(|&(to, label)| NavLink {
            to,
            label,
            active: current == to,
        })
        .collect();
    Json(links)
}
