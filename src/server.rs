//! Server startup and shutdown.
//!
//! `run_server` builds the router from the configuration, binds the
//! listener and serves until Ctrl+C or SIGTERM, then lets in-flight
//! requests drain before returning.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::routes;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server with the given configuration.
///
/// # Errors
///
/// This function will return an error if:
/// - The CORS configuration is invalid
/// - Server binding fails (e.g. the port is already in use)
/// - The listener fails while serving
pub async fn run_server(config: Config) -> AppResult<()> {
    info!("Starting server...");

    let app = routes::create_router(&config.cors)?;
    log_cors_policy(&config);

    let listener = bind(&config.server.bind_address()).await?;
    serve(listener, app, create_shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Bind a TCP listener on `addr`.
pub async fn bind(addr: &str) -> AppResult<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| AppError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// New connections stop being accepted once `shutdown` completes; requests
/// already in flight are allowed to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!("Server listening on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Listener on {} closed", local_addr);
    Ok(())
}

fn log_cors_policy(config: &Config) {
    let cors = &config.cors;
    info!(
        origins = ?cors.allowed_origins,
        methods = ?cors.allowed_methods,
        headers = ?cors.allowed_headers,
        credentials = cors.allow_credentials,
        "CORS policy configured"
    );

    if cors.mirrors_wildcards() {
        tracing::warn!(
            "Credentialed wildcard CORS enabled: every origin may send credentialed requests"
        );
    }
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails, since the server could then
/// never be stopped gracefully.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("Received Ctrl+C, shutting down");
    }
}
