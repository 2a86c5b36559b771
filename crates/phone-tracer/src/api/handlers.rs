//! HTTP request handlers.

use super::types::{ApiResponse, HealthResponse};
use super::AppState;
use crate::error::TrackError;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::any::Any;
use tracing::{error, info};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Look up a phone number.
///
/// The body is taken raw and handed to [`Tracker::handle`](crate::Tracker::handle),
/// so HTTP and function-per-request hosts share one status and envelope
/// mapping.
pub async fn track(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let (status, envelope) = state.tracker.handle(&body);

    if status.is_success() {
        let data = &envelope["data"];
        info!(
            phone_number = data["phone_number"].as_str().unwrap_or_default(),
            country_code = data["country_code"].as_str().unwrap_or_default(),
            is_valid = data["is_valid"].as_bool().unwrap_or_default(),
            "Lookup served"
        );
    }

    (status, Json(envelope))
}

/// Fallback for unknown routes and methods.
pub async fn not_found() -> Response {
    let body: ApiResponse<()> = ApiResponse::error("Not Found");
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Turn a panic inside a handler into the internal-error envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "request handler panicked".to_string()
    };

    error!(panic = %detail, "Handler panicked");
    TrackError::Internal(detail).into_response()
}
