//! Backend OAuth2 client configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// OAuth2 client configuration for the Drupal backend.
///
/// The client id and secret authenticate this gateway against the token
/// endpoint; they must never reach a browser. There are deliberately no
/// serde defaults for them — a deployment without credentials must fail
/// at startup, not at the first login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Backend base URL, e.g. `https://cms.example.com`.
    #[serde(default)]
    pub base_url: String,
    /// OAuth2 client id.
    #[serde(default)]
    pub client_id: String,
    /// OAuth2 client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Token endpoint path on the backend.
    #[serde(default = "default_token_path")]
    pub token_path: String,
    /// Request timeout in seconds for token and content calls.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Accept self-signed upstream certificates. Development only; the
    /// flag is consumed where HTTP clients are constructed, never via
    /// process-global state.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl OAuthConfig {
    /// Rejects a configuration with missing backend URL or credentials.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration("oauth.base_url is not set"));
        }
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AppError::configuration(
                "oauth.client_id / oauth.client_secret are not set",
            ));
        }
        Ok(())
    }

    /// Full URL of the token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.token_path)
    }
}

fn default_token_path() -> String {
    "/oauth/token".to_string()
}

fn default_timeout() -> u64 {
    30
}
