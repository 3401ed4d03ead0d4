//! The access/refresh token pair issued by the backend.

use serde::{Deserialize, Serialize};

/// A complete token pair as issued by the token endpoint.
///
/// Created by the acquirer on login or refresh; owned by the cookie store
/// while persisted. Both tokens are guaranteed non-empty — a response
/// missing either half is rejected before a `TokenPair` exists.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential for API calls.
    pub access_token: String,
    /// Longer-lived credential exchanged on refresh; rotated on each use.
    pub refresh_token: String,
    /// Authorization scheme, `Bearer` unless the backend says otherwise.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Granted scopes, space-delimited, when the backend reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

// Token values stay out of Debug output so they can never reach logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
