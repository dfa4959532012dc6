use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use thiserror::Error;

/// Failures of the underlying key/value blob store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Every way a pairing operation can fail. None of these leave a partial write behind.
#[derive(Error, Debug)]
pub enum PairingError {
    #[error("You are already paired with {partner}. Finish that pairing first.")]
    AlreadyPaired { partner: String },

    #[error("You are not paired with anyone right now")]
    NotPaired,

    #[error("Cannot find a user to pair with in this group...")]
    NoEligibleCandidate,

    #[error("Cannot find the user '{0}'")]
    UnknownUser(String),

    #[error("Failed to persist pairing data: {0}")]
    PersistenceFailure(#[source] StoreError),
}

pub type PairingResult<T> = Result<T, PairingError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
}

impl PairingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PairingError::AlreadyPaired { .. } | PairingError::NotPaired => StatusCode::CONFLICT,
            PairingError::NoEligibleCandidate | PairingError::UnknownUser(_) => StatusCode::NOT_FOUND,
            PairingError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: message.into(),
                partner_id: None,
            }),
        )
    }
}

impl From<PairingError> for (StatusCode, Json<ApiError>) {
    fn from(err: PairingError) -> Self {
        let partner_id = match &err {
            PairingError::AlreadyPaired { partner } => Some(partner.clone()),
            _ => None,
        };
        (
            err.status_code(),
            Json(ApiError {
                error: err.to_string(),
                partner_id,
            }),
        )
    }
}
