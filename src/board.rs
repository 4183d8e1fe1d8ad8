//! The board itself: sign-up, sign-in, posting and listing comments.
//!
//! `BoardService` composes the token verifier with the user directory and
//! the comment ledger. Stores are injected, and none of their locks is held
//! while a token is being verified.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::auth::{Identity, SessionStore};
use crate::config::{AuthConfig, BoardConfig};
use crate::error::BoardError;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{Comment, CommentId, Session};
use crate::store::{CommentLedger, UserDirectory};
use crate::verifiers::TokenVerifier;

pub struct BoardService {
    verifier: Arc<dyn TokenVerifier>,
    users: Arc<dyn UserDirectory>,
    comments: Arc<dyn CommentLedger>,
    metrics: Metrics,
    verify_timeout: Duration,
    max_comment_chars: usize,
}

impl BoardService {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        users: Arc<dyn UserDirectory>,
        comments: Arc<dyn CommentLedger>,
        metrics: Metrics,
        auth_config: &AuthConfig,
        board_config: &BoardConfig,
    ) -> Self {
        BoardService {
            verifier,
            users,
            comments,
            metrics,
            verify_timeout: Duration::from_millis(auth_config.timeout_in_ms),
            max_comment_chars: board_config.max_comment_chars,
        }
    }

    /// Register (or re-register) the token's owner under `name` and bind a
    /// session to them.
    pub async fn sign_up(
        &self,
        sessions: &dyn SessionStore,
        token: &str,
        name: &str,
    ) -> Result<Session, BoardError> {
        check_credentials(token, name)?;
        let uid = self.verify_token(token).await?;

        let session = Session::new(uid, name);
        sessions.set_session(&session).await?;
        self.users.upsert(&session.uid, name).await;

        info!("User '{}' signed up", session.uid);
        Ok(session)
    }

    /// Bind a session to the token's owner under the supplied `name`.
    ///
    /// The directory is not consulted: the session carries whatever name the
    /// client sent, even for a uid that never signed up.
    pub async fn sign_in(
        &self,
        sessions: &dyn SessionStore,
        token: &str,
        name: &str,
    ) -> Result<Session, BoardError> {
        check_credentials(token, name)?;
        let uid = self.verify_token(token).await?;

        let session = Session::new(uid, name);
        sessions.set_session(&session).await?;

        info!("User '{}' signed in", session.uid);
        Ok(session)
    }

    pub async fn post_comment(
        &self,
        identity: &Identity,
        text: &str,
    ) -> Result<CommentId, BoardError> {
        let length = text.chars().count();
        if length > self.max_comment_chars {
            return Err(BoardError::Validation(format!(
                "comment is {} characters, the limit is {}",
                length, self.max_comment_chars
            )));
        }

        let id = self.comments.append(identity.uid(), text, Utc::now()).await?;
        self.metrics.record_comment_posted();
        info!("User '{}' posted comment {}", identity.uid(), id);
        Ok(id)
    }

    pub async fn list_comments(&self, _identity: &Identity) -> Vec<Comment> {
        self.comments.list_all().await
    }

    /// Current directory name for `uid`, if they ever signed up.
    pub async fn display_name(&self, uid: &str) -> Option<String> {
        self.users.lookup(uid).await
    }

    async fn verify_token(&self, token: &str) -> Result<String, BoardError> {
        let verifier_name = self.verifier.get_name();
        let started = Instant::now();
        let result = timeout(self.verify_timeout, self.verifier.verify(token)).await;
        self.metrics
            .record_verification_duration(verifier_name, started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(uid)) => {
                self.metrics.record_verification(verifier_name, "success");
                Ok(uid)
            }
            Ok(Err(e)) => {
                warn!("Verifier '{}' rejected token: {}", verifier_name, e);
                self.metrics.record_verification(verifier_name, "failure");
                Err(BoardError::InvalidToken(e))
            }
            Err(_) => {
                warn!(
                    "Verifier '{}' timed out after {:?}",
                    verifier_name, self.verify_timeout
                );
                self.metrics.record_verification(verifier_name, "timeout");
                Err(BoardError::InvalidToken("verification timed out".to_string()))
            }
        }
    }
}

fn check_credentials(token: &str, name: &str) -> Result<(), BoardError> {
    if token.trim().is_empty() {
        return Err(BoardError::BadRequest("token is required".to_string()));
    }
    if name.trim().is_empty() {
        return Err(BoardError::BadRequest("name is required".to_string()));
    }
    Ok(())
}
