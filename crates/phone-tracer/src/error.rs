//! Error types for the tracker.

use crate::api::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use number_intel::IntelError;
use thiserror::Error;

/// Failures that end a lookup request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("Invalid JSON payload.")]
    InvalidJson,

    #[error("Phone number is required.")]
    MissingPhoneNumber,

    #[error("Invalid phone number format: {0}")]
    InvalidFormat(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl TrackError {
    pub fn status(&self) -> StatusCode {
        match self {
            TrackError::InvalidJson
            | TrackError::MissingPhoneNumber
            | TrackError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            TrackError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TrackError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<IntelError> for TrackError {
    fn from(e: IntelError) -> Self {
        match e {
            IntelError::Parse(detail) => TrackError::InvalidFormat(detail),
            other => TrackError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for TrackError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = ApiResponse::error(self.to_string());

        (status, Json(body)).into_response()
    }
}
