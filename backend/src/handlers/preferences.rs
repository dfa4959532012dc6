use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{require, ApiResult, AppState};
use crate::constants::NO_TOPICS_MESSAGE;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct BlacklistRequest {
    pub target: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlacklistResponse {
    pub blacklist: BTreeSet<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub topics: BTreeSet<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub user_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestion: Option<String>,
    pub message: String,
}

fn not_found(message: String) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            error: message,
            partner_id: None,
        }),
    )
}

pub async fn list_blacklist(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<BlacklistResponse> {
    let blacklist = engine.list_blacklist(&user_id).await;
    let message = if blacklist.is_empty() {
        "Your blacklist is empty.".to_string()
    } else {
        format!("{} users on your blacklist", blacklist.len())
    };

    Ok(Json(BlacklistResponse { blacklist, message }))
}

pub async fn add_to_blacklist(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<BlacklistRequest>,
) -> ApiResult<BlacklistResponse> {
    require("target", &req.target)?;

    let user = engine.add_to_blacklist(&user_id, &req.target).await?;

    Ok(Json(BlacklistResponse {
        blacklist: engine.list_blacklist(&user_id).await,
        message: format!("Added '{}' to your blacklist", user.username),
    }))
}

pub async fn remove_from_blacklist(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<BlacklistRequest>,
) -> ApiResult<BlacklistResponse> {
    require("target", &req.target)?;

    if !engine.remove_from_blacklist(&user_id, &req.target).await? {
        return Err(not_found(format!(
            "Cannot remove '{}' from your blacklist.",
            req.target.trim()
        )));
    }

    Ok(Json(BlacklistResponse {
        blacklist: engine.list_blacklist(&user_id).await,
        message: format!("Removed '{}' from your blacklist", req.target.trim()),
    }))
}

pub async fn list_topics(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<TopicsResponse> {
    let topics = engine.list_topics(&user_id).await;
    let message = if topics.is_empty() {
        "There are no topics set yet...".to_string()
    } else {
        format!("{} topics", topics.len())
    };

    Ok(Json(TopicsResponse { topics, message }))
}

pub async fn add_topic(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<TopicRequest>,
) -> ApiResult<TopicsResponse> {
    require("topic", &req.topic)?;

    let added = engine.add_topic(&user_id, &req.topic).await?;
    let message = if added {
        format!("Added '{}' to your topics", req.topic.trim())
    } else {
        format!("'{}' is already one of your topics", req.topic.trim())
    };

    Ok(Json(TopicsResponse {
        topics: engine.list_topics(&user_id).await,
        message,
    }))
}

pub async fn remove_topic(
    State(engine): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<TopicRequest>,
) -> ApiResult<TopicsResponse> {
    require("topic", &req.topic)?;

    if !engine.remove_topic(&user_id, &req.topic).await? {
        return Err(not_found(format!(
            "Cannot remove '{}' from your topics.",
            req.topic.trim()
        )));
    }

    Ok(Json(TopicsResponse {
        topics: engine.list_topics(&user_id).await,
        message: format!("Removed '{}' from your topics", req.topic.trim()),
    }))
}

pub async fn suggest_topic(
    State(engine): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> ApiResult<SuggestResponse> {
    let user_ids: Vec<&str> = req.user_ids.iter().map(String::as_str).collect();
    let suggestion = engine.suggest_topic(&user_ids).await;
    let message = suggestion
        .clone()
        .unwrap_or_else(|| NO_TOPICS_MESSAGE.to_string());

    Ok(Json(SuggestResponse { suggestion, message }))
}
