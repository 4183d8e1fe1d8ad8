use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    jwt_verifier::{JwtVerifier, JwtVerifierConfig},
    plain_verifier::{PlainVerifier, PlainVerifierConfig},
};

/// Configuration options for the identity provider that vouches for tokens.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum VerifierConfig {
    #[serde(rename = "jwt")]
    Jwt(JwtVerifierConfig),
    #[serde(rename = "plain")]
    Plain(PlainVerifierConfig),
}

/// Exchanges an externally issued bearer token for the UID it was issued to.
///
/// Calls may be slow or network-bound. Implementations must not have side
/// effects visible to the board.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    fn get_name(&self) -> &str;
    async fn verify(&self, token: &str) -> Result<String, String>;
}

/// Create a token verifier from a given config.
pub fn create_verifier(config: &VerifierConfig) -> Arc<dyn TokenVerifier> {
    match config {
        VerifierConfig::Jwt(cfg) => Arc::new(JwtVerifier::new(cfg)),
        VerifierConfig::Plain(cfg) => {
            info!(
                "Using plain verifier '{}' with {} static tokens",
                cfg.name,
                cfg.tokens.len()
            );
            Arc::new(PlainVerifier::new(cfg))
        }
    }
}
