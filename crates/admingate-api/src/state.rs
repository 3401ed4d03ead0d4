//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use admingate_auth::cookie::CookieStore;
use admingate_auth::guard::TokenGuard;
use admingate_auth::oauth::TokenAcquirer;
use admingate_core::config::AppConfig;
use admingate_core::error::AppError;
use admingate_drupal::client::DrupalClient;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped (or cheap to clone) for cloning across
/// tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Auth cookie store
    pub cookies: CookieStore,
    /// Token endpoint client
    pub acquirer: Arc<TokenAcquirer>,
    /// Per-request token guard with single-flight refresh
    pub guard: Arc<TokenGuard>,
    /// Authenticated backend client
    pub drupal: Arc<DrupalClient>,
}

impl AppState {
    /// Builds the full dependency graph from configuration.
    ///
    /// Used by both the server binary and the integration test harness.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let cookies = CookieStore::new(&config.cookies);
        let acquirer = Arc::new(TokenAcquirer::new(&config.oauth)?);
        let guard = Arc::new(TokenGuard::new(Arc::clone(&acquirer), cookies.clone()));
        let drupal = Arc::new(DrupalClient::new(&config.oauth)?);

        Ok(Self {
            config: Arc::new(config),
            cookies,
            acquirer,
            guard,
            drupal,
        })
    }
}
