//! Shared application state.

use crate::board::BoardService;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; everything inside is behind an `Arc` or is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The board, with its verifier and stores.
    pub board: Arc<BoardService>,
    /// Prometheus registry shared with the board and the session gate.
    pub metrics: Metrics,
}
