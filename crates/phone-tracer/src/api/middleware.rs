//! Rate limiting and request logging middleware.

use crate::error::TrackError;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, info, warn};

/// Global rate limiter (not keyed by IP).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across requests.
#[derive(Clone, Default)]
pub struct RateLimitState {
    /// Global limiter for lookups, `None` when limiting is off
    pub global: Option<Arc<GlobalLimiter>>,
}

impl RateLimitState {
    /// Allow `requests_per_minute` lookups; `0` turns limiting off.
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            global: NonZeroU32::new(requests_per_minute)
                .map(|rpm| Arc::new(RateLimiter::direct(Quota::per_minute(rpm)))),
        }
    }

    /// No limit at all.
    pub fn unlimited() -> Self {
        Self { global: None }
    }

    /// Whether a request may proceed right now.
    pub fn check(&self) -> bool {
        self.global
            .as_ref()
            .map_or(true, |limiter| limiter.check().is_ok())
    }
}

/// Rate limiting middleware.
///
/// Returns 429 Too Many Requests with the error envelope once the global
/// quota is spent.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, TrackError> {
    if !rate_limit.check() {
        warn!("Global rate limit exceeded");
        return Err(TrackError::RateLimitExceeded);
    }

    debug!("Rate limit check passed");
    Ok(next.run(request).await)
}

/// Logging middleware for requests.
///
/// Lookups are tagged 🔍 and front-end assets 📄; everything else is
/// logged at debug level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if method == Method::POST {
        if status.is_success() {
            info!(%method, %uri, %status, ?duration, "🔍 {method} {uri} → {status}");
        } else {
            warn!(%method, %uri, %status, ?duration, "🔍 {method} {uri} → {status}");
        }
    } else if is_asset(uri.path()) {
        info!(%method, %uri, %status, ?duration, "📄 {method} {uri} → {status}");
    } else {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    }

    response
}

fn is_asset(path: &str) -> bool {
    [".html", ".css", ".js"]
        .iter()
        .any(|extension| path.ends_with(extension))
}
