//! HTTP route definitions and handlers.
//!
//! Sign-up and sign-in are public. Comment routes sit behind the session
//! gate. Health and metrics are public and unauthenticated.

mod auth_routes;
mod comment_routes;
mod health_routes;
mod metrics_routes;

use axum::extract::rejection::JsonRejection;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::auth::require_session;
use crate::auth::session_store::cookie_key;
use crate::error::BoardError;
use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// Fails if the session secret cannot be turned into a cookie key.
pub fn create_router(state: AppState) -> Result<Router, String> {
    let session_config = &state.config.session;
    // Records are never evicted, so the store only grows while the process runs.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(session_config.cookie_name.clone())
        .with_secure(session_config.secure)
        .with_private(cookie_key(session_config)?);

    let protected = comment_routes::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_session,
    ));

    Ok(Router::new()
        .merge(auth_routes::routes())
        .merge(protected)
        .layer(session_layer)
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Malformed or unparseable JSON bodies are a plain 400.
pub(crate) fn bad_body(rejection: JsonRejection) -> BoardError {
    BoardError::BadRequest(rejection.body_text())
}
