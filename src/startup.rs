//! Application startup and server initialization.
//!
//! Builds the verifier, the stores and the board from configuration, then
//! serves the router on the configured address.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::info;

use crate::board::BoardService;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;
use crate::store::{MemoryCommentLedger, MemoryUserDirectory};
use crate::verifiers::create_verifier;

/// Assemble the shared state from configuration.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Metrics::new()?;
    let verifier = create_verifier(&config.verifier);
    info!("Using token verifier '{}'", verifier.get_name());

    let board = Arc::new(BoardService::new(
        verifier,
        Arc::new(MemoryUserDirectory::new()),
        Arc::new(MemoryCommentLedger::new()),
        metrics.clone(),
        &config.auth,
        &config.board,
    ));

    Ok(AppState {
        config,
        board,
        metrics,
    })
}

/// Verify a single token with the configured verifier and return its uid.
///
/// Used by `bbs --check-token` to diagnose identity-provider setup without
/// starting the server. The configured verification timeout applies.
pub async fn check_token(config: &ConfigV1, token: &str) -> Result<String, String> {
    let verifier = create_verifier(&config.verifier);
    info!("Checking token with verifier '{}'", verifier.get_name());

    let limit = Duration::from_millis(config.auth.timeout_in_ms);
    match timeout(limit, verifier.verify(token)).await {
        Ok(result) => result,
        Err(_) => Err(format!(
            "verifier '{}' timed out after {}ms",
            verifier.get_name(),
            config.auth.timeout_in_ms
        )),
    }
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the state cannot be built, the server fails to bind
/// to the configured address, or the server stops with an I/O error.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone())?;
    let app = routes::create_router(state)?;

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
