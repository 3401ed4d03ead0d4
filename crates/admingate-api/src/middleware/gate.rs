//! Cookie-presence route gate for page paths.
//!
//! This is a lightweight check — it only asks whether an access-token
//! cookie exists. Expiry and scope validation happen later, in the
//! session layer, once a handler actually needs the token.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::state::AppState;

/// Auth-flow pages reachable without a session.
const AUTH_FLOW_PATHS: &[&str] = &["/signin", "/signup", "/reset-password"];

/// Prefixes the gate never touches: the API (it reports 401s itself) and
/// static assets.
const GATE_EXEMPT_PREFIXES: &[&str] = &["/api", "/static", "/favicon.ico"];

/// Redirects cookie-less page requests to the sign-in page, preserving
/// the originally requested path for post-login navigation.
pub async fn route_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let exempt = AUTH_FLOW_PATHS
        .iter()
        .chain(GATE_EXEMPT_PREFIXES.iter())
        .any(|prefix| path.starts_with(prefix));
    if exempt {
        return next.run(request).await;
    }

    if state.cookies.access_token(&jar).is_none() {
        debug!(path = %path, "No access token cookie, redirecting to sign-in");
        let redirect: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
        return Redirect::temporary(&format!("/signin?redirect={redirect}")).into_response();
    }

    next.run(request).await
}
