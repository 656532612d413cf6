//! Layered error types for the server
//!
//! Configuration and upstream failures are separate enums; both surface to
//! clients through [`ApiError`], which renders a JSON body. The text core
//! (`tipo-text`) is total and contributes no error variants.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// The variable name
        name: &'static str,
    },

    /// An environment variable holds an unusable value
    #[error("invalid value for {name}: {value}")]
    InvalidVar {
        /// The variable name
        name: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Failures talking to the upstream search API or trend feed
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("upstream request failed: {0}")]
    Request(String),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {status}")]
    Status {
        /// The HTTP status code
        status: u16,
    },

    /// Upstream body could not be decoded as the expected JSON envelope
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// Trend feed body could not be parsed as RSS
    #[error("failed to parse trend feed: {0}")]
    FeedParse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    error: &'static str,
    message: String,
}

/// A client-facing error: an HTTP status plus a JSON `{error, message}` body
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            body: ApiErrorBody {
                error,
                message: message.into(),
            },
        }
    }

    /// 400 for a missing or blank required parameter
    pub fn missing_param(name: &str) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "invalid_parameter",
            format!("'{name}' parameter is required"),
        )
    }

    /// 400 for a parameter with an unusable value
    pub fn invalid_param(name: &str, message: impl Into<String>) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "invalid_parameter",
            format!("'{name}': {}", message.into()),
        )
    }

    /// The HTTP status this error renders with
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        tracing::error!(error = %err, "upstream call failed");
        ApiError::new(
            StatusCode::BAD_GATEWAY,
            "upstream_failure",
            err.to_string(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
