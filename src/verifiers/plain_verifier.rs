use std::collections::HashMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TokenVerifier;

/// PlainVerifierConfig lists fixed tokens, for local development and tests.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainVerifierConfig {
    /// A friendly name for logs.
    pub name: String,
    pub tokens: Vec<PlainTokenEntry>,
}

/// A single accepted token and the UID it stands for.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainTokenEntry {
    pub token: String,
    pub uid: String,
}

/// Accepts exactly the tokens listed in its config.
pub struct PlainVerifier {
    name: String,
    tokens: HashMap<String, String>,
}

impl PlainVerifier {
    pub fn new(config: &PlainVerifierConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|entry| (entry.token.clone(), entry.uid.clone()))
            .collect();
        Self {
            name: config.name.clone(),
            tokens,
        }
    }
}

#[async_trait]
impl TokenVerifier for PlainVerifier {
    fn get_name(&self) -> &str {
        &self.name
    }

    async fn verify(&self, token: &str) -> Result<String, String> {
        match self.tokens.get(token) {
            Some(uid) if !uid.is_empty() => {
                debug!("Plain verifier '{}' accepted token for uid '{}'", self.name, uid);
                Ok(uid.clone())
            }
            Some(_) => Err("Token maps to an empty uid".to_string()),
            None => Err("Unknown token".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> PlainVerifier {
        PlainVerifier::new(&PlainVerifierConfig {
            name: "TestPlain".to_string(),
            tokens: vec![
                PlainTokenEntry {
                    token: "alpha".to_string(),
                    uid: "uid-alpha".to_string(),
                },
                PlainTokenEntry {
                    token: "blank".to_string(),
                    uid: String::new(),
                },
            ],
        })
    }

    #[tokio::test]
    async fn test_known_token() {
        assert_eq!(verifier().verify("alpha").await, Ok("uid-alpha".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        assert!(verifier().verify("beta").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_uid_is_rejected() {
        assert!(verifier().verify("blank").await.is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(verifier().get_name(), "TestPlain");
    }
}
