// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{dashboard, generator, history, profile, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (views, tests, sessions, profile).
/// * Applies global middleware (Trace, CORS).
/// * Injects the shared application state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:5173"),
        HeaderValue::from_static("http://127.0.0.1:5173"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let view_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/navigation", get(dashboard::get_navigation))
        .route("/generator/options", get(generator::get_options));

    let session_routes = Router::new()
        .route(
            "/",
            post(session::start_session)
                .get(session::get_session)
                .delete(session::abandon_session),
        )
        .route("/answers/{question}", put(session::select_answer))
        .route("/review/{question}", post(session::toggle_review))
        .route("/navigate", post(session::navigate))
        .route("/submit", post(session::submit));

    let test_routes = Router::new()
        .route("/", get(history::list_tests).post(generator::create_test))
        .route("/{id}/analysis", get(history::get_analysis))
        .nest("/{id}/session", session_routes);

    let profile_routes = Router::new()
        .route("/user", get(profile::get_user).put(profile::set_user))
        .route("/stats", patch(profile::update_stats))
        .route(
            "/achievements",
            get(profile::list_achievements).post(profile::unlock_achievement),
        );

    Router::new()
        .nest(
            "/api",
            view_routes.merge(profile_routes).nest("/tests", test_routes),
        )
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
