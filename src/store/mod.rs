pub mod base;
pub mod memory_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{UserDirectory, CommentLedger};"
pub use base::{CommentLedger, UserDirectory};
pub use memory_store::{MemoryCommentLedger, MemoryUserDirectory};
