//! API and startup error types

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pd_engine::EngineError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level errors, mapped to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not a decodable image
    #[error("{0}")]
    ImageLoad(String),

    /// Missing or malformed request field
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ImageLoad(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ImageLoad(msg) => ApiError::ImageLoad(msg),
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::InvalidConfig(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("extraction task failed: {}", err))
    }
}

/// Errors that stop the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Engine configuration rejected: {0}")]
    Engine(#[from] EngineError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Metrics recorder setup failed: {0}")]
    Metrics(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
