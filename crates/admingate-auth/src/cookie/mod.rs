//! HttpOnly cookie persistence for the token pair.

pub mod store;

pub use store::{
    ACCESS_TOKEN_COOKIE, CookieStore, EXPIRES_IN_COOKIE, REFRESH_TOKEN_COOKIE, StoredTokens,
    TOKEN_TYPE_COOKIE,
};
