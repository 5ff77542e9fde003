//! # Remixer
//!
//! A local web service that remixes text through the Anthropic Messages API.
//!
//! ## Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: API key for the Messages API (required)
//! - `PORT`: Server port (defaults to 3000)
//! - `RUST_LOG`: Log filter for `env_logger`
//!
//! A `.env` file in the working directory is read before the variables above.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use remixer::{
    build_router, get_server_port, AnthropicClient, BrowserOpener, RemixController,
    RemixerConfig, SystemClipboard,
};

/// Main entry point for the remixer web service.
///
/// This function initializes the logging system, loads the API key, sets up
/// the HTTP server with all routes, and serves until Ctrl-C.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// ANTHROPIC_API_KEY=sk-ant-... cargo run
///
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug cargo run
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match dotenvy::dotenv() {
        Ok(path) => eprintln!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => eprintln!("Failed to read .env file: {}", e),
    }

    // Initialize the logging system
    env_logger::init();

    let config = RemixerConfig::from_env()?;
    let port = get_server_port()?;

    let client = AnthropicClient::new(config)?;
    let controller = Arc::new(RemixController::new(
        Arc::new(client),
        Arc::new(SystemClipboard),
        Arc::new(BrowserOpener),
    ));

    // Build the HTTP application with all routes and middleware
    let app = build_router(Arc::clone(&controller))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    info!("Starting remixer server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
    }

    controller.shutdown().await;
    info!("Remixer server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
