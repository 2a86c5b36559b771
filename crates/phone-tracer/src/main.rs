//! PhoneTracer - Entry point.

use phone_tracer::{
    api::{create_router_with_options, AppState, RateLimitState, RouterOptions, TRACK_PATH},
    config::Config,
    Tracker,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("📱 Starting PhoneTracer");

    // Numbering-plan data is shared read-only by every request
    number_intel::warm_up();
    let state = AppState::new(Tracker::with_default_intelligence());

    let static_dir = if config.server.serve_static {
        if config.server.static_dir.is_dir() {
            info!(dir = %config.server.static_dir.display(), "Serving static files");
            Some(config.server.static_dir.clone())
        } else {
            warn!(
                dir = %config.server.static_dir.display(),
                "Static directory not found, serving the API only"
            );
            None
        }
    } else {
        None
    };

    let rate_limit = RateLimitState::new(config.rate_limit.global_per_minute);
    if rate_limit.global.is_some() {
        info!(
            per_minute = config.rate_limit.global_per_minute,
            "Rate limiting lookups"
        );
    }

    let app = create_router_with_options(
        state,
        RouterOptions {
            static_dir,
            rate_limit,
        },
    );

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .unwrap_or([127, 0, 0, 1].into()),
        config.server.port,
    );

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("🌐 Listening on http://{}", addr);
    info!("🔍 Lookups at POST {}", TRACK_PATH);
    info!("🛑 Press Ctrl+C to stop");

    // Run server
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("⛔ Server stopped.");
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        // Keep serving; the process can still be killed
        std::future::pending::<()>().await;
    }
}
