// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use uuid::Uuid;

/// Message shown to the user whenever the generation call fails.
pub const GENERATION_FAILED: &str = "Failed to generate questions. Try again.";

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (wizard input, out-of-range answers, malformed bodies)
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 404 Not Found for a test id; the client goes back to the dashboard
    TestNotFound(Uuid),

    // 409 Conflict (e.g., retaking a test that already has a score)
    Conflict(String),

    // 502 Bad Gateway: the text-generation service failed or answered garbage
    Upstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::TestNotFound(id) => {
                tracing::debug!("Test {} not found, redirecting home", id);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": "Test not found", "redirect": "/" }),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Upstream(msg) => {
                tracing::error!("Question generation failed: {}", msg);
                (StatusCode::BAD_GATEWAY, json!({ "error": GENERATION_FAILED }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Transport and decoding failures of the outbound generation call.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
