// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure of a single user's activity fetch.
///
/// Never retried; one of these anywhere in a batch fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("access token rejected")]
    Unauthorized,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Failure of a fan-out batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchFetchError {
    /// First fetch failure observed, in completion order.
    #[error("couldn't fetch activity history: {0}")]
    Fetch(#[source] FetchError),

    /// A fetch task ended without reporting a result (it panicked).
    #[error("couldn't fetch activity history: a fetch task ended without a result")]
    Incomplete,
}

impl BatchFetchError {
    /// The underlying fetch error, if a fetch reported one.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            BatchFetchError::Fetch(e) => Some(e),
            BatchFetchError::Incomplete => None,
        }
    }
}

impl From<BatchFetchError> for AppError {
    fn from(err: BatchFetchError) -> Self {
        AppError::StravaApi(err.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::StravaApi(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::StravaApi(msg) => {
                tracing::warn!(error = %msg, "Strava API error");
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
