//! Unified application error types for AdminGate.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No token pair is stored for the current session.
    NotAuthenticated,
    /// The identity provider rejected the supplied username/password.
    InvalidCredentials,
    /// The identity provider rejected the stored refresh token.
    RefreshInvalid,
    /// The session cannot be repaired; cookies must be cleared and the
    /// user sent back through the login flow.
    ReauthenticationRequired,
    /// The backend rejected the access token mid-request (401).
    AuthenticationExpired,
    /// The token endpoint returned 2xx but the body is missing one half of
    /// the token pair.
    MalformedTokenResponse,
    /// Any other non-2xx from the token endpoint.
    AuthProvider,
    /// Input validation failed.
    Validation,
    /// The requested resource was not found.
    NotFound,
    /// A configuration error occurred.
    Configuration,
    /// The backend could not be reached or returned an unusable response.
    Upstream,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "NOT_AUTHENTICATED"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::RefreshInvalid => write!(f, "REFRESH_INVALID"),
            Self::ReauthenticationRequired => write!(f, "REAUTHENTICATION_REQUIRED"),
            Self::AuthenticationExpired => write!(f, "AUTHENTICATION_EXPIRED"),
            Self::MalformedTokenResponse => write!(f, "MALFORMED_TOKEN_RESPONSE"),
            Self::AuthProvider => write!(f, "AUTH_PROVIDER_ERROR"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Upstream => write!(f, "UPSTREAM"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout AdminGate.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary. Messages must never contain token
/// values.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status reported by the identity provider, when the error
    /// originated there.
    pub upstream_status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            upstream_status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            upstream_status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-authenticated error.
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a refresh-invalid error.
    pub fn refresh_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RefreshInvalid, message)
    }

    /// Create a reauthentication-required error.
    pub fn reauthentication_required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReauthenticationRequired, message)
    }

    /// Create an authentication-expired error.
    pub fn authentication_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationExpired, message)
    }

    /// Create a malformed-token-response error.
    pub fn malformed_token_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedTokenResponse, message)
    }

    /// Create an auth-provider error carrying the upstream status.
    pub fn auth_provider(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::AuthProvider,
            message: message.into(),
            upstream_status: Some(status),
            source: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            upstream_status: self.upstream_status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors render URLs but never request bodies, so no
        // credential material leaks into the message.
        Self::with_source(ErrorKind::Upstream, format!("Upstream error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
