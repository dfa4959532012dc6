use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::{require, ApiResult, AppState};
use crate::constants::{PAIRING_FINISHED_MESSAGE, PAIRING_STARTED_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub user_id: String,
    pub group_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub partner_id: String,
    pub message: String,
    pub topic_suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FinishRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinishResponse {
    pub partner_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PairingStatus {
    pub partner_id: Option<String>,
    /// Oldest first
    pub history: Vec<String>,
}

/// Pairs the requesting user with someone from the given group.
pub async fn start_pairing(
    State(engine): State<AppState>,
    Json(req): Json<StartRequest>,
) -> ApiResult<StartResponse> {
    require("user_id", &req.user_id)?;
    require("group_id", &req.group_id)?;

    let started = engine.start_pairing(&req.user_id, &req.group_id).await?;

    Ok(Json(StartResponse {
        partner_id: started.partner_id,
        message: PAIRING_STARTED_MESSAGE.to_string(),
        topic_suggestion: started.topic_suggestion,
    }))
}

pub async fn finish_pairing(
    State(engine): State<AppState>,
    Json(req): Json<FinishRequest>,
) -> ApiResult<FinishResponse> {
    require("user_id", &req.user_id)?;

    let partner_id = engine.finish_pairing(&req.user_id).await?;

    Ok(Json(FinishResponse {
        partner_id,
        message: PAIRING_FINISHED_MESSAGE.to_string(),
    }))
}

pub async fn pairing_status(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<PairingStatus> {
    let (partner_id, history) = engine.pairing_status(&user_id).await;

    Ok(Json(PairingStatus {
        partner_id,
        history,
    }))
}
