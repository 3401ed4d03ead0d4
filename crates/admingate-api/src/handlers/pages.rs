//! Minimal auth-flow pages.
//!
//! The dashboard frontend owns the real UI; these shells exist so the
//! gate's redirect target always resolves, including when the gateway
//! runs standalone.

use axum::response::Html;

const SIGNIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<form method="post" action="/api/login" id="signin">
  <label>Username <input name="username" autocomplete="username"></label>
  <label>Password <input name="password" type="password" autocomplete="current-password"></label>
  <button type="submit">Sign in</button>
</form>
</body>
</html>
"#;

const SIGNUP_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign up</title></head>
<body><p>Accounts are managed in the CMS backend.</p></body>
</html>
"#;

const RESET_PASSWORD_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Reset password</title></head>
<body><p>Password resets are handled by the CMS backend.</p></body>
</html>
"#;

/// GET /signin
pub async fn signin() -> Html<&'static str> {
    Html(SIGNIN_PAGE)
}

/// GET /signup
pub async fn signup() -> Html<&'static str> {
    Html(SIGNUP_PAGE)
}

/// GET /reset-password
pub async fn reset_password() -> Html<&'static str> {
    Html(RESET_PASSWORD_PAGE)
}
