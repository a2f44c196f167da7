//! Error types for the portfolio API
//!
//! `FetchError` describes why an upstream call produced no data; `AppError`
//! is what a route handler surfaces to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failure of an upstream fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Upstream confirmed the resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network failure, timeout or non-success status
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Upstream answered with a payload we could not parse
    #[error("Unexpected upstream payload: {0}")]
    Decode(String),

    /// A credential or setting required for this upstream is missing
    #[error("{0} is not configured")]
    NotConfigured(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if err.is_timeout() {
            FetchError::Upstream(format!("request timed out: {err}"))
        } else {
            FetchError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Convenience Result type for upstream fetchers.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// == App Error Enum ==
/// Error surfaced by a route handler.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request parameter
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream failed and nothing could be substituted
    #[error("{0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// Convenience Result type for route handlers.
pub type Result<T> = std::result::Result<T, AppError>;
