//! Unverified JWT payload decoding.
//!
//! Decodes the payload segment of a JWT without checking the signature.
//! That is safe only inside this system's trust boundary: tokens are
//! written by the trusted backend into HttpOnly cookies that browser
//! script never sees. Reusing this module in any other deployment
//! topology requires real signature verification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::claims::Claims;

/// Decode a JWT's payload into [`Claims`].
///
/// Returns `None` unless the token has exactly three dot-separated
/// segments and the middle segment is URL-safe base64 of a JSON object.
pub fn decode(token: &str) -> Option<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    // JWT payloads use unpadded base64url; translate to the standard
    // alphabet and restore padding before decoding.
    let mut translated: String = segments[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while translated.len() % 4 != 0 {
        translated.push('=');
    }

    let bytes = STANDARD.decode(translated).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Whether the given token string should be treated as expired.
///
/// Fail closed: an undecodable token, absent claims, or a missing `exp`
/// all count as expired.
pub fn token_expired(token: &str) -> bool {
    decode(token).map(|claims| claims.is_expired()).unwrap_or(true)
}
