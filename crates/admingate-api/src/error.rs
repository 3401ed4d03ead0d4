//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use admingate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Set when the session is unrecoverable and the client must run the
    /// login flow again.
    #[serde(rename = "requiresLogin", skip_serializing_if = "Option::is_none")]
    pub requires_login: Option<bool>,
}

/// HTTP-facing wrapper for [`AppError`].
///
/// `AppError` lives in a crate without an axum dependency, so the
/// response mapping happens on this newtype; `?` converts via `From`.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotAuthenticated
            | ErrorKind::InvalidCredentials
            | ErrorKind::AuthenticationExpired
            | ErrorKind::RefreshInvalid
            | ErrorKind::ReauthenticationRequired => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MalformedTokenResponse | ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            // Auth provider failures pass the upstream status through,
            // the way the original token proxy reported them.
            ErrorKind::AuthProvider => err
                .upstream_status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let requires_login = matches!(
            err.kind,
            ErrorKind::RefreshInvalid | ErrorKind::ReauthenticationRequired
        )
        .then_some(true);

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
            requires_login,
        };

        (status, Json(body)).into_response()
    }
}
