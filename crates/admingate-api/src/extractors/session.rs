//! `CurrentSession` extractor — pulls the validated session the session
//! middleware stored in request extensions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use admingate_core::error::AppError;

use crate::error::ApiError;
pub use crate::middleware::session::CurrentSession;

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| {
                ApiError(AppError::not_authenticated(
                    "Request did not pass the session layer",
                ))
            })
    }
}
