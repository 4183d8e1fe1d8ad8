use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum length of `secret`: the private-cookie key needs 64 bytes of material.
pub const MIN_SECRET_BYTES: usize = 64;

/// Settings for the session cookie that carries the session handle.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Key material used to encrypt and authenticate the cookie.
    pub secret: String,
    /// Only send the cookie over HTTPS. Disable for local plain-HTTP setups.
    #[serde(default = "default_secure")]
    pub secure: bool,
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_secure() -> bool {
    true
}
