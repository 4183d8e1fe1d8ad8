use async_trait::async_trait;
use tower_sessions::cookie::Key;
use tracing::{debug, warn};

use crate::config::{SessionConfig, MIN_SECRET_BYTES};
use crate::error::BoardError;
use crate::models::Session;

/// Key under which the whole [`Session`] value is stored.
pub const SESSION_KEY: &str = "board.session";

/// Request-scoped access to the session bound to the caller's handle.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The bound session, or `None` when the handle is absent or its
    /// payload cannot be read. Never an error: `None` means unauthenticated.
    async fn get_session(&self) -> Option<Session>;

    /// Replace the bound session with `session` in one write and make sure
    /// the handle is sent back to the client.
    async fn set_session(&self, session: &Session) -> Result<(), BoardError>;
}

#[async_trait]
impl SessionStore for tower_sessions::Session {
    async fn get_session(&self) -> Option<Session> {
        match self.get::<Session>(SESSION_KEY).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Unreadable session treated as absent: {}", e);
                None
            }
        }
    }

    async fn set_session(&self, session: &Session) -> Result<(), BoardError> {
        // A handle minted before authentication must not become authenticated.
        self.cycle_id()
            .await
            .map_err(|e| BoardError::Internal(format!("Failed to rotate session id: {}", e)))?;
        self.insert(SESSION_KEY, session)
            .await
            .map_err(|e| BoardError::Internal(format!("Failed to store session: {}", e)))?;
        debug!("Session bound to uid '{}'", session.uid);
        Ok(())
    }
}

/// Derive the private-cookie key from the configured secret.
pub fn cookie_key(config: &SessionConfig) -> Result<Key, String> {
    if config.secret.len() < MIN_SECRET_BYTES {
        return Err(format!(
            "session.secret must be at least {} bytes, got {}",
            MIN_SECRET_BYTES,
            config.secret.len()
        ));
    }
    Key::try_from(config.secret.as_bytes()).map_err(|e| format!("Invalid session.secret: {}", e))
}
