// Best-effort role extraction from a bearer token
//
// Tokens are treated as three dot-separated segments with a base64-encoded
// JSON payload in the middle. This is NOT verification - the backend remains
// the authority on token validity. The decoder only recovers the role claim
// for routing when durable storage lost it.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;

/// Extract the `role` claim from a token's payload segment.
///
/// Returns `None` on any malformation: wrong segment count, undecodable
/// base64, non-JSON payload, or a missing/non-string `role` field.
pub fn decode_role_claim(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let (_header, payload, _sig) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    // JWT payloads are base64url, but tolerate the standard alphabet too
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .ok()?;

    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("role")?.as_str().map(str::to_string)
}
