//! # admingate-api
//!
//! HTTP API layer for AdminGate built on Axum.
//!
//! Provides the auth endpoints, the cookie-presence route gate, the
//! session middleware that runs the token guard, content proxy handlers,
//! DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
