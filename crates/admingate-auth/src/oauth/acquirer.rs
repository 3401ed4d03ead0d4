//! Exchanges credentials or a refresh token for a new token pair.

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use admingate_core::config::OAuthConfig;
use admingate_core::error::{AppError, ErrorKind};

use crate::token::TokenPair;

/// Performs password and refresh grants against the token endpoint.
///
/// Holds the client credentials; must only ever run in a trusted server
/// context. The HTTP client carries the configured TLS policy explicitly
/// instead of mutating process-global state.
#[derive(Clone)]
pub struct TokenAcquirer {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for TokenAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAcquirer")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Which grant a token request is performing; drives 401 mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    Password,
    Refresh,
}

/// OAuth2 error body, `{error, error_description}`.
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Raw token endpoint response before the pair contract is enforced.
#[derive(Deserialize)]
struct RawTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenAcquirer {
    /// Creates an acquirer from OAuth configuration.
    pub fn new(config: &OAuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Exchanges a username and password for a token pair.
    pub async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, AppError> {
        let params = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", username),
            ("password", password),
        ];

        let pair = self.request_token(&params, Grant::Password).await?;
        info!(username = %username, "Password grant succeeded");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new, rotated token pair.
    ///
    /// On success the old refresh token is permanently invalid upstream;
    /// the caller must persist the new pair.
    pub async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        let pair = self.request_token(&params, Grant::Refresh).await?;
        info!("Refresh grant succeeded, token pair rotated");
        Ok(pair)
    }

    async fn request_token(
        &self,
        params: &[(&str, &str)],
        grant: Grant,
    ) -> Result<TokenPair, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Upstream,
                    format!("Token endpoint unreachable: {e}"),
                    e,
                )
            })?;

        let status = response.status();

        if !status.is_success() {
            let body: OAuthErrorBody = response.json().await.unwrap_or_default();
            return Err(Self::grant_error(grant, status.as_u16(), body));
        }

        let raw: RawTokenResponse = response.json().await.map_err(|e| {
            AppError::malformed_token_response(format!("Token endpoint returned non-JSON: {e}"))
        })?;

        let access_token = raw
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::malformed_token_response("Response missing access_token"))?;
        let refresh_token = raw
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::malformed_token_response("Response missing refresh_token"))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: raw.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: raw.expires_in.unwrap_or(3600),
            scope: raw.scope,
        })
    }

    /// Maps a token endpoint failure into the error taxonomy.
    ///
    /// 401 is the credential-rejected signal; `invalid_grant` covers
    /// backends that report consumed refresh tokens as 400 per RFC 6749.
    fn grant_error(grant: Grant, status: u16, body: OAuthErrorBody) -> AppError {
        let invalid_grant = body.error.as_deref() == Some("invalid_grant");
        let description = body
            .error_description
            .unwrap_or_else(|| "Authentication failed".to_string());

        match grant {
            Grant::Password if status == 401 => {
                warn!(status, "Password grant rejected");
                AppError::invalid_credentials("Invalid username or password")
            }
            Grant::Refresh if status == 401 || invalid_grant => {
                warn!(status, "Refresh token rejected, rotation required");
                AppError::refresh_invalid(description)
            }
            _ => {
                warn!(status, error = ?body.error, "Token endpoint error");
                AppError::auth_provider(status, description)
            }
        }
    }
}
