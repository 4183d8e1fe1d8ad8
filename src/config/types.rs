use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use crate::verifiers::VerifierConfig;

/// Prefix for environment overrides, e.g. `BBS_SESSION__SECURE=false`.
pub const ENV_PREFIX: &str = "BBS_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub verifier: VerifierConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

/// Settings for the token exchange performed by sign-up and sign-in.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AuthConfig {
    /// Upper bound for a single verification call.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

fn default_timeout_in_ms() -> u64 {
    5000
}

/// Limits applied to posted comments.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct BoardConfig {
    #[serde(default = "default_max_comment_chars")]
    pub max_comment_chars: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_comment_chars: default_max_comment_chars(),
        }
    }
}

fn default_max_comment_chars() -> usize {
    1000
}

/// Load config from a YAML file, with `BBS_`-prefixed environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"));
    extract(figment)
}

/// Parse a config from an in-memory YAML document.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
