//! Credential and password-reset settings.

use serde::Deserialize;

/// Authentication settings. The token signing secret is never read from
/// the file; it comes from `AUTH_TOKEN_SECRET`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer token lifetime.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// bcrypt work factor.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Password reset token lifetime.
    #[serde(default = "default_reset_token_ttl_minutes")]
    pub reset_token_ttl_minutes: i64,
    /// Base URL of the web frontend, used to build reset links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Loaded from the environment.
    #[serde(skip)]
    pub token_secret: Option<String>,
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_reset_token_ttl_minutes() -> i64 {
    60
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            reset_token_ttl_minutes: default_reset_token_ttl_minutes(),
            frontend_url: default_frontend_url(),
            token_secret: None,
        }
    }
}
