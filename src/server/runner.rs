//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

use super::{
    error::ServerError,
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Run the netplay relay server
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8080)
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address or
/// if there's an error during server execution.
pub async fn run_server(host: String, port: u16) -> Result<(), ServerError> {
    let bind_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    tracing::info!("Connect to: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    serve(listener).await
}

/// Serve the relay on an already-bound listener.
///
/// Split out from [`run_server`] so tests can bind to an ephemeral port
/// themselves and read the address back before serving.
pub async fn serve(listener: TcpListener) -> Result<(), ServerError> {
    // One registry per server instance, shared into every handler
    let app_state = Arc::new(AppState::new());

    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket_handler))
        // HTTP endpoints
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .with_state(app_state);

    tracing::info!(
        "Netplay relay server listening on {}",
        listener.local_addr()?
    );

    // Set up graceful shutdown signal handler
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
