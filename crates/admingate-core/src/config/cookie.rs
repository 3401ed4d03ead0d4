//! Auth cookie configuration.

use serde::{Deserialize, Serialize};

/// Settings for the auth cookie pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Set the `Secure` flag. On outside development.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// Refresh token cookie lifetime in days, independent of access-token
    /// expiry.
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u64,
    /// Path scope for the refresh token cookie. Narrower than `/` so page
    /// requests never carry it; must cover the refresh endpoint and every
    /// API route that may refresh transparently.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Also persist `token_type` and `expires_in` as cookies.
    #[serde(default)]
    pub persist_token_metadata: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: default_secure(),
            refresh_ttl_days: default_refresh_ttl_days(),
            refresh_path: default_refresh_path(),
            persist_token_metadata: false,
        }
    }
}

fn default_secure() -> bool {
    true
}

fn default_refresh_ttl_days() -> u64 {
    30
}

fn default_refresh_path() -> String {
    "/api".to_string()
}
