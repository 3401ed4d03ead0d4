//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
///
/// Fields are optional so a missing member is reported as a 400 by our
/// validation, before any call to the token endpoint, instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(required(message = "Username is required"))]
    pub username: Option<String>,
    /// Password.
    #[validate(required(message = "Password is required"))]
    pub password: Option<String>,
}

/// Pagination query for collection proxies.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size.
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Page number, defaulting to 1 and clamped away from 0.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, defaulting to 10 and clamped away from 0.
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(10).max(1)
    }

    /// Collection offset for the current page.
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}
