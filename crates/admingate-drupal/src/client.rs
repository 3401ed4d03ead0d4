//! Authenticated HTTP client for the Drupal backend.

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method};
use tracing::debug;

use admingate_core::config::OAuthConfig;
use admingate_core::error::AppError;

/// A bearer credential for one upstream call.
///
/// Borrowed from the guard's validated session; never stored here.
#[derive(Clone, Copy)]
pub struct Bearer<'a> {
    /// Authorization scheme, normally `Bearer`.
    pub token_type: &'a str,
    /// The raw access token.
    pub access_token: &'a str,
}

impl Bearer<'_> {
    fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Options for a single upstream request.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// HTTP method; GET when unset.
    pub method: Option<Method>,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers. Authorization and Content-Type set by the client
    /// take precedence over anything given here.
    pub headers: HeaderMap,
    /// JSON request body.
    pub body: Option<serde_json::Value>,
}

/// HTTP client wrapping every backend call with the current bearer token.
///
/// Carries the same injected TLS policy and timeout as the token
/// acquirer; no process-global client state.
#[derive(Clone)]
pub struct DrupalClient {
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for DrupalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrupalClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DrupalClient {
    /// Creates a client from OAuth configuration.
    pub fn new(config: &OAuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves `path` against the backend origin unless it is already
    /// absolute.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Performs an authenticated request against the backend.
    ///
    /// An upstream 401 means the access token was rejected mid-request;
    /// this layer surfaces it as `AuthenticationExpired` and never
    /// retries — refresh-then-retry belongs to the token guard.
    pub async fn request(
        &self,
        bearer: Bearer<'_>,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.resolve_url(path);
        let method = options.method.unwrap_or(Method::GET);

        debug!(method = %method, path = %path, "Upstream request");

        // Caller headers are merged first; Authorization and Content-Type
        // always win.
        let mut headers = options.headers;
        headers.insert(
            AUTHORIZATION,
            bearer
                .header_value()
                .parse()
                .map_err(|_| AppError::internal("Access token is not a valid header value"))?,
        );
        headers.insert(CONTENT_TYPE, http::HeaderValue::from_static("application/json"));

        let mut request = self.http.request(method, &url).headers(headers);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() == http::StatusCode::UNAUTHORIZED {
            return Err(AppError::authentication_expired(
                "Backend rejected the access token",
            ));
        }

        Ok(response)
    }

    /// Performs a GET and deserializes the JSON body.
    pub async fn get_json(
        &self,
        bearer: Bearer<'_>,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<serde_json::Value, AppError> {
        let response = self
            .request(
                bearer,
                path,
                RequestOptions {
                    query,
                    ..Default::default()
                },
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "Backend returned {status} for {path}"
            )));
        }

        Ok(response.json().await?)
    }
}
