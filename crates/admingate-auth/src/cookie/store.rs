//! Reads and writes the auth cookies on a request's cookie jar.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use admingate_core::config::CookieConfig;

use crate::token::TokenPair;

/// Access token cookie name.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Refresh token cookie name.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// Token type cookie name (metadata, optional).
pub const TOKEN_TYPE_COOKIE: &str = "token_type";
/// Expires-in cookie name (metadata, optional).
pub const EXPIRES_IN_COOKIE: &str = "expires_in";

/// Tokens read back from a request's cookies.
///
/// `refresh_token` is absent on requests outside the refresh cookie's
/// path scope, and metadata is only present when persistence is enabled.
#[derive(Clone)]
pub struct StoredTokens {
    /// The raw access token string.
    pub access_token: String,
    /// The raw refresh token string, when its cookie was sent.
    pub refresh_token: Option<String>,
    /// Persisted token type, when metadata cookies are enabled.
    pub token_type: Option<String>,
}

/// Builds, reads, and clears the auth cookies.
///
/// All cookies are HttpOnly and SameSite=Lax. The access cookie lives as
/// long as the token itself; the refresh cookie has a fixed longer
/// lifetime and a narrower path. No method logs token values.
#[derive(Debug, Clone)]
pub struct CookieStore {
    secure: bool,
    refresh_max_age: Duration,
    refresh_path: String,
    persist_metadata: bool,
}

impl CookieStore {
    /// Creates a store from cookie configuration.
    pub fn new(config: &CookieConfig) -> Self {
        Self {
            secure: config.secure,
            refresh_max_age: Duration::days(config.refresh_ttl_days as i64),
            refresh_path: config.refresh_path.clone(),
            persist_metadata: config.persist_token_metadata,
        }
    }

    /// Writes the pair onto the jar, replacing any previous cookies.
    pub fn apply(&self, jar: CookieJar, pair: &TokenPair) -> CookieJar {
        let access_max_age = Duration::seconds(pair.expires_in as i64);

        let mut jar = jar
            .add(self.build(
                ACCESS_TOKEN_COOKIE,
                pair.access_token.clone(),
                "/",
                access_max_age,
            ))
            .add(self.build(
                REFRESH_TOKEN_COOKIE,
                pair.refresh_token.clone(),
                &self.refresh_path,
                self.refresh_max_age,
            ));

        if self.persist_metadata {
            jar = jar
                .add(self.build(
                    TOKEN_TYPE_COOKIE,
                    pair.token_type.clone(),
                    "/",
                    access_max_age,
                ))
                .add(self.build(
                    EXPIRES_IN_COOKIE,
                    pair.expires_in.to_string(),
                    "/",
                    access_max_age,
                ));
        }

        jar
    }

    /// Reads the stored tokens, `None` when no access token cookie exists.
    pub fn read(&self, jar: &CookieJar) -> Option<StoredTokens> {
        let access_token = self.access_token(jar)?;
        Some(StoredTokens {
            access_token,
            refresh_token: self.refresh_token(jar),
            token_type: jar.get(TOKEN_TYPE_COOKIE).map(|c| c.value().to_string()),
        })
    }

    /// The raw access token string, if present.
    pub fn access_token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// The raw refresh token string, if present.
    pub fn refresh_token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Removes every auth cookie, metadata included, regardless of the
    /// persistence flag — switching it must never strand cookies.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/").build())
            .remove(
                Cookie::build(REFRESH_TOKEN_COOKIE)
                    .path(self.refresh_path.clone())
                    .build(),
            )
            .remove(Cookie::build(TOKEN_TYPE_COOKIE).path("/").build())
            .remove(Cookie::build(EXPIRES_IN_COOKIE).path("/").build())
    }

    fn build(
        &self,
        name: &'static str,
        value: String,
        path: &str,
        max_age: Duration,
    ) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .path(path.to_string())
            .build()
    }
}
