//! # admingate-drupal
//!
//! Authenticated fetch against the Drupal backend plus thin JSON:API
//! helpers. The JSON:API surface is deliberately small — resource reads
//! and path translation — the gateway is not a general JSON:API client.

pub mod client;
pub mod jsonapi;

pub use client::{Bearer, DrupalClient, RequestOptions};
pub use jsonapi::{JsonApiParams, TranslatedPath};
