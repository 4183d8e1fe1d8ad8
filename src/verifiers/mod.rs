pub mod base;
pub mod jwt_verifier;
pub mod plain_verifier;

// Re-export the primary verifier items so code outside can do
// "use crate::verifiers::{TokenVerifier, create_verifier};"
pub use base::{create_verifier, TokenVerifier, VerifierConfig};
