use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{CommentLedger, UserDirectory};
use crate::error::BoardError;
use crate::models::{Comment, CommentId};

/// Process-memory user directory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<String, String>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn upsert(&self, uid: &str, display_name: &str) {
        let previous = self
            .users
            .write()
            .await
            .insert(uid.to_string(), display_name.to_string());
        if previous.is_some() {
            debug!("Replaced display name for uid '{}'", uid);
        }
    }

    async fn lookup(&self, uid: &str) -> Option<String> {
        self.users.read().await.get(uid).cloned()
    }
}

/// Process-memory comment ledger. The write lock serializes appends, so the
/// vector index doubles as the comment id.
#[derive(Default)]
pub struct MemoryCommentLedger {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentLedger for MemoryCommentLedger {
    async fn append(
        &self,
        uid: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<CommentId, BoardError> {
        if uid.is_empty() {
            return Err(BoardError::Validation("comment author is empty".to_string()));
        }
        if text.trim().is_empty() {
            return Err(BoardError::Validation("comment text is empty".to_string()));
        }

        let mut comments = self.comments.write().await;
        let id = CommentId(comments.len() as u64);
        comments.push(Comment {
            id,
            uid: uid.to_string(),
            text: text.to_string(),
            posted_at: now,
        });
        Ok(id)
    }

    async fn list_all(&self) -> Vec<Comment> {
        self.comments.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.comments.read().await.len()
    }
}
