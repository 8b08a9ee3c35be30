use anyhow::{Context, Result};
use axum::serve;
use cinelist::core::config::Config;
use cinelist::core::state::AppState;
use cinelist::core::{routes, tracing_init};
use cinelist::security::rate_limiter::LoginRateLimiter;
use cinelist::utils::time::current_timestamp;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path)
        .context(format!(
            "Failed to load configuration from '{}'. \
            If this is your first time running the server, copy config.example.toml to config.toml and adjust the values.",
            config_path.display()
        ))?;

    // Initialize tracing/logging
    tracing_init::init_tracing(&config.logging);

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = config.server.port,
        num_threads = config.server.num_threads,
        request_timeout_seconds = config.server.request_timeout,
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "Movie catalog API starting"
    );

    let port = config.server.port;
    let request_timeout = config.server.request_timeout;

    let state = Arc::new(AppState::new(config));

    spawn_limiter_cleanup_task(Arc::clone(&state.login_limiter));

    // Build the router with middleware
    let app = routes::build_router(Arc::clone(&state)).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
            )
            // Bounds every request; a stalled handler becomes a 408 instead of hanging
            .layer(TimeoutLayer::new(Duration::from_secs(request_timeout))),
    );

    let addr = format!("0.0.0.0:{}", port);
    info!(address = %addr, "Starting TCP listener");

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "TCP listener bound, serving requests");

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("Shutting down gracefully");

    Ok(())
}

/// Spawn a background task that periodically drops expired login-limiter windows
fn spawn_limiter_cleanup_task(limiter: Arc<LoginRateLimiter>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));

        loop {
            interval.tick().await;

            limiter.cleanup_old_entries(current_timestamp());
            debug!(tracked_usernames = limiter.len(), "Login limiter cleanup completed");
        }
    });
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
