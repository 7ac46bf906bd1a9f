use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        achievement::Achievement,
        user::{StatsUpdate, User},
    },
    store::SharedStore,
};

/// Current user, or `null` when nobody is set.
pub async fn get_user(State(store): State<SharedStore>) -> impl IntoResponse {
    Json(store.read().await.user().cloned())
}

/// Replaces the current user. A `null` body clears it.
pub async fn set_user(
    State(store): State<SharedStore>,
    Json(user): Json<Option<User>>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(user) = &user {
        user.validate()?;
    }
    store.write().await.set_user(user.clone());
    Ok(Json(user))
}

/// Merges the given counters into the stored stats.
pub async fn update_stats(
    State(store): State<SharedStore>,
    Json(update): Json<StatsUpdate>,
) -> Result<impl IntoResponse, AppError> {
    update.validate()?;
    let mut store = store.write().await;
    store.update_stats(update);
    Ok(Json(store.stats()))
}

pub async fn list_achievements(State(store): State<SharedStore>) -> impl IntoResponse {
    Json(store.read().await.achievements().to_vec())
}

/// Unlocks an achievement. Unlocking the same id twice is a conflict.
pub async fn unlock_achievement(
    State(store): State<SharedStore>,
    Json(achievement): Json<Achievement>,
) -> Result<impl IntoResponse, AppError> {
    achievement.validate()?;

    let id = achievement.id.clone();
    if !store.write().await.unlock_achievement(achievement) {
        return Err(AppError::Conflict(format!("Achievement '{}' already unlocked", id)));
    }
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}
