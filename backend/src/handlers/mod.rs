pub mod pairings;
pub mod preferences;

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::engine::PairingEngine;
use crate::error::ApiError;

pub type AppState = Arc<PairingEngine>;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(engine: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Pairing lifecycle
        .route("/api/pairings/start", post(pairings::start_pairing))
        .route("/api/pairings/finish", post(pairings::finish_pairing))
        .route("/api/users/{user_id}/pairing", get(pairings::pairing_status))
        // Preferences
        .route(
            "/api/users/{user_id}/blacklist",
            get(preferences::list_blacklist)
                .post(preferences::add_to_blacklist)
                .delete(preferences::remove_from_blacklist),
        )
        .route(
            "/api/users/{user_id}/topics",
            get(preferences::list_topics)
                .post(preferences::add_topic)
                .delete(preferences::remove_topic),
        )
        .route("/api/topics/suggest", post(preferences::suggest_topic))
        .with_state(engine)
}

async fn health_check() -> &'static str {
    "OK"
}

fn require(field: &str, value: &str) -> Result<(), (StatusCode, Json<ApiError>)> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} must not be empty", field)));
    }
    Ok(())
}
