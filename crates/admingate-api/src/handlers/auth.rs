//! Auth handlers — login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;
use validator::Validate;

use admingate_auth::token::decode;
use admingate_core::error::{AppError, ErrorKind};

use crate::dto::request::LoginRequest;
use crate::dto::response::{
    LoginResponse, MessageResponse, RefreshResponse, SessionResponse, TokenSummary,
};
use crate::error::ApiError;
use crate::extractors::session::CurrentSession;
use crate::state::AppState;

/// POST /api/login
///
/// Exchanges credentials for a token pair via the password grant, then
/// persists the pair in HttpOnly cookies. The response body carries the
/// access token summary only — the refresh token never leaves its cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Reject incomplete input before any upstream call.
    req.validate()
        .map_err(|_| AppError::validation("Username and password are required"))?;

    let username = req.username.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError(AppError::validation(
            "Username and password are required",
        )));
    }

    let pair = state.acquirer.password_grant(username, password).await?;

    let body = LoginResponse {
        success: true,
        token: TokenSummary {
            access_token: pair.access_token.clone(),
            token_type: pair.token_type.clone(),
            expires_in: pair.expires_in,
        },
    };

    info!(username = %username, "Login succeeded, session cookies set");

    Ok((state.cookies.apply(jar, &pair), Json(body)))
}

/// POST /api/refresh
///
/// Rotates the token pair using the refresh token cookie. Any rejection
/// of the stored refresh token clears the session cookies and tells the
/// client to log in again.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(refresh_token) = state.cookies.refresh_token(&jar) else {
        let err = AppError::reauthentication_required("Refresh token not found");
        return (state.cookies.clear(jar), ApiError(err)).into_response();
    };

    match state.acquirer.refresh_grant(&refresh_token).await {
        Ok(pair) => {
            let body = RefreshResponse {
                success: true,
                expires_in: pair.expires_in,
            };
            (state.cookies.apply(jar, &pair), Json(body)).into_response()
        }
        Err(err) if err.kind == ErrorKind::RefreshInvalid => {
            info!("Refresh token rejected, clearing session cookies");
            (state.cookies.clear(jar), ApiError(err)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// POST /api/logout
///
/// Clears every auth cookie. The backend keeps no session state for this
/// gateway, so cookie removal is the whole logout.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    info!("Logout, clearing session cookies");
    (
        state.cookies.clear(jar),
        Json(MessageResponse { success: true }),
    )
}

/// GET /api/me
///
/// Claims summary for the current session, recomputed from the access
/// token on every call.
pub async fn me(session: CurrentSession) -> Result<Json<SessionResponse>, ApiError> {
    let claims = decode(&session.access_token)
        .ok_or_else(|| AppError::not_authenticated("Access token claims are not decodable"))?;

    Ok(Json(SessionResponse {
        sub: claims.sub.clone(),
        scopes: claims.scope_set().into_iter().collect(),
        expires_at: claims.exp,
    }))
}
