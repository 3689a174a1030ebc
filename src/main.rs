//! View Cache - process-local cache for derived view objects
//!
//! Serves cached profile views over HTTP and exposes cache maintenance
//! endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use view_cache::api::create_router;
use view_cache::views::{InMemoryDirectory, UserDirectory};
use view_cache::{AppState, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the user directory
/// 4. Create the view cache (starts its sweeper)
/// 5. Serve the Axum router on the configured port
/// 6. On SIGINT/SIGTERM, drain requests, then stop the cache and wait for
///    its final flush
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "view_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting View Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_items={}, default_ttl={}s, sweep_interval={}s, port={}",
        config.max_items, config.default_ttl, config.sweep_interval, config.server_port
    );

    let directory = match &config.user_directory {
        Some(path) => InMemoryDirectory::from_json_file(path)?,
        None => {
            warn!("USER_DIRECTORY_FILE not set, starting with an empty user directory");
            InMemoryDirectory::new()
        }
    };
    info!("User directory loaded: {} users", directory.user_count());
    let directory: Arc<dyn UserDirectory> = Arc::new(directory);

    let state = AppState::from_config(&config, directory);
    let cache = state.cache.clone();

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    cache.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
