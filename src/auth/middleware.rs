//! Middleware that puts protected routes behind the session gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::gate::{AuthGate, GateOutcome};
use super::session_store::SessionStore;
use crate::metrics::MetricsRecorder;
use crate::state::AppState;

/// Runs the gate for every request to a protected route.
///
/// On `Allowed` the identity is stored in the request extensions and the
/// request continues. On `Rejected` the error response is returned and the
/// wrapped handler is never called.
pub async fn require_session(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = AuthGate::evaluate(session.get_session().await);
    state.metrics.record_gate_outcome(outcome.label());

    match outcome {
        GateOutcome::Allowed(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        GateOutcome::Rejected(err) => err.into_response(),
    }
}
