//! OAuth2 grants against the backend token endpoint.

pub mod acquirer;

pub use acquirer::TokenAcquirer;
