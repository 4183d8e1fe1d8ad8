pub mod comment;
pub mod session;

pub use comment::{Comment, CommentId};
pub use session::Session;
