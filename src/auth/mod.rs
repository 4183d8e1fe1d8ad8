//! Session authentication: the gate, its middleware, and the session seam.

pub mod gate;
pub mod middleware;
pub mod session_store;

pub use gate::{AuthGate, GateOutcome, Identity};
pub use middleware::require_session;
pub use session_store::SessionStore;
