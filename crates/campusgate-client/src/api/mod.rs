// Typed endpoint wrappers
//
// One module per backend area. These stay thin: build the request, hand it
// to ApiClient, unwrap the backend's `data` envelope. Shapes the backend
// owns outright (registration payloads, scan results, leave statistics)
// stay as serde_json::Value rather than guessing a schema.

pub mod approvals;
pub mod auth;
pub mod gate_desk;
pub mod passes;

use serde::Deserialize;

/// Payload-bearing responses arrive wrapped in a `data` field.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
