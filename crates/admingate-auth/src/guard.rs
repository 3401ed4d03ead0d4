//! Per-request token validity check and transparent refresh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::CookieJar;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use admingate_core::error::{AppError, ErrorKind};

use crate::cookie::CookieStore;
use crate::oauth::TokenAcquirer;
use crate::token::{TokenPair, decode};

/// How long a completed rotation is reusable by callers still presenting
/// the old refresh token. Long enough to cover requests that raced past
/// the same expired access token, short enough that a genuinely stale
/// cookie still fails.
const ROTATION_REUSE_WINDOW: Duration = Duration::from_secs(30);

/// Lazy-sweep threshold for the in-flight map.
const INFLIGHT_SWEEP_LEN: usize = 64;

/// A validated session ready for upstream calls.
#[derive(Clone)]
pub struct SessionTokens {
    /// Bearer credential for upstream calls.
    pub access_token: String,
    /// Authorization scheme, `Bearer` unless persisted metadata says
    /// otherwise.
    pub token_type: String,
    /// The rotated pair when a refresh happened; the caller must persist
    /// it back onto the response cookies.
    pub rotated: Option<TokenPair>,
}

impl SessionTokens {
    /// Whether this request triggered a refresh.
    pub fn refreshed(&self) -> bool {
        self.rotated.is_some()
    }
}

/// Outcome slot shared by concurrent refreshes of the same token.
#[derive(Default)]
struct RefreshSlot {
    outcome: Option<(TokenPair, Instant)>,
}

/// Decides, per request, whether the stored token is usable, and runs the
/// refresh-then-retry flow when it is not.
///
/// State machine: `Unauthenticated → ValidToken → (expired) → Refreshing
/// → ValidToken | Unauthenticated(forced)`. Refreshes are single-flighted
/// per refresh token so concurrent requests that both observe an expired
/// access token share one rotation instead of racing — the loser of the
/// race receives the winner's rotated pair rather than a forced re-login.
pub struct TokenGuard {
    acquirer: Arc<TokenAcquirer>,
    cookies: CookieStore,
    inflight: DashMap<String, Arc<Mutex<RefreshSlot>>>,
}

impl std::fmt::Debug for TokenGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGuard")
            .field("inflight", &self.inflight.len())
            .finish_non_exhaustive()
    }
}

impl TokenGuard {
    /// Creates a guard over the given acquirer and cookie store.
    pub fn new(acquirer: Arc<TokenAcquirer>, cookies: CookieStore) -> Self {
        Self {
            acquirer,
            cookies,
            inflight: DashMap::new(),
        }
    }

    /// Returns a usable token for the session in the jar, refreshing if
    /// the stored access token has expired.
    ///
    /// Errors: `NotAuthenticated` when no access token is stored,
    /// `ReauthenticationRequired` when the session cannot be repaired —
    /// the caller must clear the auth cookies and send the user back
    /// through login.
    pub async fn ensure_valid(&self, jar: &CookieJar) -> Result<SessionTokens, AppError> {
        let stored = self
            .cookies
            .read(jar)
            .ok_or_else(|| AppError::not_authenticated("No access token in session"))?;

        // Undecodable tokens fall through to refresh, same as expired ones.
        let expired = decode(&stored.access_token)
            .map(|claims| claims.is_expired())
            .unwrap_or(true);

        if !expired {
            return Ok(SessionTokens {
                access_token: stored.access_token,
                token_type: stored.token_type.unwrap_or_else(|| "Bearer".to_string()),
                rotated: None,
            });
        }

        let refresh_token = stored.refresh_token.ok_or_else(|| {
            AppError::reauthentication_required("Access token expired and no refresh token stored")
        })?;

        debug!("Access token expired, refreshing");
        let pair = self.refresh_single_flight(&refresh_token).await?;

        Ok(SessionTokens {
            access_token: pair.access_token.clone(),
            token_type: pair.token_type.clone(),
            rotated: Some(pair),
        })
    }

    /// Runs one refresh grant per refresh token, memoizing the rotated
    /// pair for [`ROTATION_REUSE_WINDOW`] so racing callers converge on
    /// the same rotation.
    async fn refresh_single_flight(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        self.sweep_stale_slots();

        let slot = self
            .inflight
            .entry(refresh_token.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(RefreshSlot::default())))
            .clone();

        let mut slot = slot.lock().await;

        let reusable = slot
            .outcome
            .as_ref()
            .filter(|(_, completed_at)| completed_at.elapsed() < ROTATION_REUSE_WINDOW)
            .map(|(pair, _)| pair.clone());
        if let Some(pair) = reusable {
            info!("Joining concurrent refresh, reusing rotated token pair");
            return Ok(pair);
        }
        // Any memoized rotation past its window is dropped; retrying the
        // old token upstream then fails, which is the correct stale-reuse
        // outcome.
        slot.outcome = None;

        match self.acquirer.refresh_grant(refresh_token).await {
            Ok(pair) => {
                slot.outcome = Some((pair.clone(), Instant::now()));
                Ok(pair)
            }
            Err(err) => {
                drop(slot);
                self.inflight.remove(refresh_token);

                if err.kind == ErrorKind::RefreshInvalid {
                    Err(AppError::with_source(
                        ErrorKind::ReauthenticationRequired,
                        "Refresh token rejected; session must re-authenticate",
                        err,
                    ))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Drops memoized rotations whose reuse window has passed. Slots with
    /// a refresh still in flight stay.
    fn sweep_stale_slots(&self) {
        if self.inflight.len() < INFLIGHT_SWEEP_LEN {
            return;
        }
        self.inflight.retain(|_, slot| match slot.try_lock() {
            Ok(slot) => slot
                .outcome
                .as_ref()
                .map(|(_, at)| at.elapsed() < ROTATION_REUSE_WINDOW)
                .unwrap_or(true),
            Err(_) => true,
        });
    }
}
