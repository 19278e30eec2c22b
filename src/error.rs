//! Custom error types for the dashboard
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors raised while talking to the news backend
#[derive(Error, Debug)]
pub enum NewsClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid backend URL {url}: {reason}")]
    InvalidBackendUrl { url: String, reason: String },
}

/// Top-level dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("News backend error: {0}")]
    Client(#[from] NewsClientError),

    #[error("A query batch is already being analyzed")]
    BatchInProgress,

    #[error("Submission contains no queries")]
    EmptySubmission,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Client(_) => StatusCode::BAD_GATEWAY,
            DashboardError::BatchInProgress => StatusCode::CONFLICT,
            DashboardError::EmptySubmission => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({"status": "error", "message": self.to_string()}))).into_response()
    }
}

/// Helper to tell a timed-out backend call from other transport failures
pub fn is_timeout(err: &NewsClientError) -> bool {
    matches!(err, NewsClientError::Network(e) if e.is_timeout())
}
