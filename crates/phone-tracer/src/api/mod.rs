//! HTTP transport for the tracker.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::tracker::Tracker;
use axum::{
    http::{header, Method},
    middleware as axum_middleware,
    routing::{get, get_service, post, MethodRouter},
    Router,
};
use std::path::PathBuf;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowMethods, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Path of the lookup endpoint.
pub const TRACK_PATH: &str = "/api/track";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Lookup handler
    pub tracker: Tracker,
}

impl AppState {
    /// Create new application state.
    pub fn new(tracker: Tracker) -> Self {
        Self { tracker }
    }
}

/// Router construction options.
#[derive(Clone, Default)]
pub struct RouterOptions {
    /// Directory served for paths no API route matches
    pub static_dir: Option<PathBuf>,
    /// Limit applied to lookups
    pub rate_limit: RateLimitState,
}

/// Create the API router without static files or rate limiting.
pub fn create_router(state: AppState) -> Router {
    create_router_with_options(state, RouterOptions::default())
}

/// Create the API router with custom options.
pub fn create_router_with_options(state: AppState, options: RouterOptions) -> Router {
    let mut allowed_methods = vec![Method::POST, Method::OPTIONS];
    if options.static_dir.is_some() {
        allowed_methods.insert(0, Method::GET);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::list(allowed_methods))
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        // Lookup endpoint (with rate limiting)
        .route(
            TRACK_PATH,
            post(handlers::track).route_layer(axum_middleware::from_fn_with_state(
                options.rate_limit.clone(),
                rate_limit_middleware,
            )),
        )
        // Health check (no rate limiting)
        .route("/health", get(handlers::health));

    let router = match options.static_dir {
        Some(dir) => {
            let static_files: MethodRouter =
                get_service(ServeDir::new(dir)).fallback(handlers::not_found);
            router.fallback_service(static_files)
        }
        None => router.fallback(handlers::not_found),
    };

    router
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
