//! # admingate-auth
//!
//! The OAuth2 token lifecycle for AdminGate: unverified claim decoding,
//! cookie persistence, password/refresh grants against the backend token
//! endpoint, and the per-request token guard with single-flight refresh.
//!
//! ## Modules
//!
//! - `token` — token pair model, JWT payload decoding, claim helpers
//! - `cookie` — HttpOnly cookie persistence of the token pair
//! - `oauth` — password and refresh grants against the token endpoint
//! - `guard` — per-request validity check and transparent refresh

pub mod cookie;
pub mod guard;
pub mod oauth;
pub mod token;

pub use cookie::CookieStore;
pub use guard::{SessionTokens, TokenGuard};
pub use oauth::TokenAcquirer;
pub use token::{Claims, TokenPair, decode};
