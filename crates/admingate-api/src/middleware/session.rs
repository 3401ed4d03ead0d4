//! Session middleware — runs the token guard for guarded API routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use admingate_core::error::ErrorKind;
use admingate_drupal::client::Bearer;

use crate::error::ApiError;
use crate::state::AppState;

/// The validated session, inserted into request extensions for handlers.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Usable access token (post-refresh when one happened).
    pub access_token: String,
    /// Authorization scheme.
    pub token_type: String,
}

impl CurrentSession {
    /// Borrowed bearer credential for upstream calls.
    pub fn bearer(&self) -> Bearer<'_> {
        Bearer {
            token_type: &self.token_type,
            access_token: &self.access_token,
        }
    }
}

/// Ensures the request carries a usable token before the handler runs.
///
/// On transparent refresh the rotated pair is written back onto the
/// response cookies. On forced re-authentication all auth cookies are
/// cleared and the 401 carries `requiresLogin`, so the frontend knows to
/// run the login flow instead of retrying.
pub async fn ensure_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match state.guard.ensure_valid(&jar).await {
        Ok(tokens) => {
            request.extensions_mut().insert(CurrentSession {
                access_token: tokens.access_token.clone(),
                token_type: tokens.token_type.clone(),
            });

            let response = next.run(request).await;

            match tokens.rotated {
                Some(pair) => {
                    info!("Persisting rotated token pair to session cookies");
                    (state.cookies.apply(jar, &pair), response).into_response()
                }
                None => response,
            }
        }
        Err(err) if err.kind == ErrorKind::ReauthenticationRequired => {
            (state.cookies.clear(jar), ApiError(err)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}
