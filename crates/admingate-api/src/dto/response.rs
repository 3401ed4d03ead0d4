//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Login response. The refresh token is deliberately excluded — it lives
/// only in its HttpOnly cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether login succeeded.
    pub success: bool,
    /// Access token summary.
    pub token: TokenSummary,
}

/// The client-visible slice of a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSummary {
    /// Access token.
    pub access_token: String,
    /// Authorization scheme.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Whether the rotation succeeded.
    pub success: bool,
    /// New access token lifetime in seconds.
    pub expires_in: u64,
}

/// Simple success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the request succeeded.
    pub success: bool,
}

/// Decoded claims summary for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Subject (user id) claim.
    pub sub: Option<String>,
    /// Normalized scope set.
    pub scopes: Vec<String>,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: Option<i64>,
}

/// Proxied collection with a pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse {
    /// Resources for this page.
    pub data: Vec<serde_json::Value>,
    /// Pagination info.
    pub pagination: Pagination,
}

/// Pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total item count.
    pub total: u64,
    /// Total pages.
    pub total_pages: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
