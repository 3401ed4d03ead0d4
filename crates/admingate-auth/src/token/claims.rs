//! Claims carried in the access token payload.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims decoded from an access token's payload segment.
///
/// Every field is optional: the backend controls the payload shape and
/// this gateway must degrade safely when a claim is absent. Claims are
/// ephemeral — recomputed from the token on each request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user id.
    #[serde(default)]
    pub sub: Option<String>,
    /// Scope claim as a space-delimited string or a list.
    #[serde(default)]
    pub scope: Option<ScopeClaim>,
    /// Alternate spelling used by some OAuth2 servers.
    #[serde(default)]
    pub scopes: Option<ScopeClaim>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
    /// Any other claims the backend includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A scope claim in either wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeClaim {
    /// Space-delimited string, e.g. `"editor publisher"`.
    Spaced(String),
    /// Explicit list of scope names.
    List(Vec<String>),
}

impl Claims {
    /// Whether the token these claims came from has expired.
    ///
    /// Fail closed: a missing `exp` counts as expired.
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => exp * 1000 < Utc::now().timestamp_millis(),
            None => true,
        }
    }

    /// The user id from the subject claim.
    pub fn user_id(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Normalized scope set, empty if the claim is absent.
    ///
    /// Prefers `scopes` over `scope` when both appear, matching the
    /// backend's own precedence.
    pub fn scope_set(&self) -> BTreeSet<String> {
        let claim = self.scopes.as_ref().or(self.scope.as_ref());
        match claim {
            Some(ScopeClaim::List(list)) => {
                list.iter().filter(|s| !s.is_empty()).cloned().collect()
            }
            Some(ScopeClaim::Spaced(s)) => s
                .split(' ')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Whether the required scopes are granted.
    ///
    /// `require_all` demands every listed scope; otherwise one match
    /// suffices.
    pub fn has_scope(&self, required: &[&str], require_all: bool) -> bool {
        let granted = self.scope_set();
        if require_all {
            required.iter().all(|s| granted.contains(*s))
        } else {
            required.iter().any(|s| granted.contains(*s))
        }
    }
}
