use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BoardError;
use crate::models::{Comment, CommentId};

/// Registry of known users, keyed by UID.
///
/// Implementations own their synchronization; callers never lock.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert or replace the display name for `uid`.
    async fn upsert(&self, uid: &str, display_name: &str);
    async fn lookup(&self, uid: &str) -> Option<String>;
}

/// Append-only, ordered store of comments.
#[async_trait]
pub trait CommentLedger: Send + Sync {
    /// Append to the tail. Rejects an empty `uid` or `text` with
    /// `BoardError::Validation`.
    async fn append(
        &self,
        uid: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<CommentId, BoardError>;

    /// A point-in-time copy of every comment, in append order.
    async fn list_all(&self) -> Vec<Comment>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
