use axum::extract::FromRequestParts;
use http::request::Parts;
use tracing::{debug, warn};

use crate::error::BoardError;
use crate::models::Session;

/// An identity proven by the session gate for the current request.
///
/// Only [`AuthGate::evaluate`] can produce one, so holding an `Identity`
/// means the gate allowed the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    uid: String,
    name: String,
}

impl Identity {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of running the gate. The request pipeline has to match on it
/// before the downstream handler can run.
#[derive(Debug)]
pub enum GateOutcome {
    Allowed(Identity),
    Rejected(BoardError),
}

impl GateOutcome {
    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            GateOutcome::Allowed(_) => "allowed",
            GateOutcome::Rejected(_) => "rejected",
        }
    }
}

/// Stateless per-request check of the session bound to a request.
pub struct AuthGate;

impl AuthGate {
    pub fn evaluate(session: Option<Session>) -> GateOutcome {
        match session {
            Some(session) if session.is_complete() => {
                debug!("Session gate allowed uid '{}'", session.uid);
                GateOutcome::Allowed(Identity {
                    uid: session.uid,
                    name: session.name,
                })
            }
            Some(session) => {
                warn!(
                    "Session is incomplete (uid empty: {}, name empty: {})",
                    session.uid.is_empty(),
                    session.name.is_empty()
                );
                GateOutcome::Rejected(BoardError::Unauthenticated)
            }
            None => {
                debug!("No session bound to request");
                GateOutcome::Rejected(BoardError::Unauthenticated)
            }
        }
    }
}

/// Handlers behind [`require_session`](super::require_session) take the
/// identity the gate stored in the request extensions. Without it the
/// request is rejected, never served anonymously.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(BoardError::Unauthenticated)
    }
}
