//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use admingate_api::{AppState, build_router};
use admingate_core::config::{AppConfig, CookieConfig, LoggingConfig, OAuthConfig, ServerConfig};

/// Test application context: the router under test plus the wiremock
/// server standing in for the Drupal backend.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Mock Drupal backend (token endpoint + JSON:API)
    pub upstream: MockServer,
}

impl TestApp {
    /// Create a new test application against a fresh mock backend.
    pub async fn new() -> Self {
        let upstream = MockServer::start().await;

        let config = AppConfig {
            server: ServerConfig::default(),
            oauth: OAuthConfig {
                base_url: upstream.uri(),
                client_id: "admin-dashboard".to_string(),
                client_secret: "testing-secret".to_string(),
                token_path: "/oauth/token".to_string(),
                timeout_seconds: 5,
                accept_invalid_certs: false,
            },
            cookies: CookieConfig {
                secure: false,
                refresh_ttl_days: 30,
                refresh_path: "/api".to_string(),
                persist_token_metadata: false,
            },
            logging: LoggingConfig::default(),
        };

        let state = AppState::from_config(config).expect("Failed to build state");

        Self {
            router: build_router(state),
            upstream,
        }
    }

    /// Mounts a successful token endpoint response.
    pub async fn mount_token_success(&self, access_token: &str, refresh_token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": access_token,
                "refresh_token": refresh_token,
                "token_type": "Bearer",
                "expires_in": 3600,
            })))
            .mount(&self.upstream)
            .await;
    }

    /// Mounts a token endpoint rejection.
    pub async fn mount_token_failure(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.upstream)
            .await;
    }

    /// Mounts the article collection endpoint.
    pub async fn mount_articles(&self, data: Value) {
        Mock::given(method("GET"))
            .and(path("/jsonapi/node/article"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })),
            )
            .mount(&self.upstream)
            .await;
    }

    /// Number of requests the mock backend received for `endpoint`.
    pub async fn upstream_hits(&self, endpoint: &str) -> usize {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookies) = cookies {
            req = req.header(header::COOKIE, cookies);
        }

        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (Null for non-JSON responses)
    pub body: Value,
}

impl TestResponse {
    /// All raw `Set-Cookie` header values.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The value set for a cookie name, if any `Set-Cookie` matches.
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.set_cookies().iter().find_map(|c| {
            let (cookie_name, rest) = c.split_once('=')?;
            if cookie_name == name {
                Some(rest.split(';').next().unwrap_or("").to_string())
            } else {
                None
            }
        })
    }

    /// The full `Set-Cookie` line for a cookie name.
    pub fn cookie_line(&self, name: &str) -> Option<String> {
        self.set_cookies()
            .into_iter()
            .find(|c| c.starts_with(&format!("{name}=")))
    }
}

/// Builds an unsigned-but-shaped JWT whose payload expires at `exp`.
pub fn forge_jwt(sub: &str, scope: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({
            "sub": sub,
            "scope": scope,
            "exp": exp,
            "iat": exp - 3600,
        })
        .to_string(),
    );
    format!("{header}.{payload}.test-signature")
}

/// A forged access token that is still valid.
pub fn fresh_access_token() -> String {
    forge_jwt("12", "editor publisher", chrono::Utc::now().timestamp() + 3600)
}

/// A forged access token that expired an hour ago.
pub fn expired_access_token() -> String {
    forge_jwt("12", "editor publisher", chrono::Utc::now().timestamp() - 3600)
}
