//! Handler extractors.

pub mod session;
