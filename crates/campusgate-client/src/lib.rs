// CampusGate client library
//
// This crate owns the authentication session lifecycle and everything that
// talks to the backend:
//
// - SessionStore: durable persistence for the (token, user, role) triple
// - ApiClient: the single HTTP chokepoint - bearer header, normalized
//   errors, and the 401 => session teardown policy
// - AuthSession: login/logout plus the one-shot startup hydration that
//   reconciles cached identity with a live profile fetch
// - Route gates: pure render-or-redirect decisions consulted before any
//   protected or public surface is shown
// - api: typed wrappers for the backend endpoints the frontend consumes
//
// Key design decisions:
// - Callers never see a raw transport error; every failure is an ApiError
//   with a readable message and a status
// - Hydration failures resolve to "operate on cached data" or "silent
//   logout", never a user-facing error
// - The 401 side effect is an injected hook so the wrapper has no knowledge
//   of navigation

pub mod api;
pub mod error;
pub mod gate;
pub mod http;
pub mod session;
pub mod store;

pub use error::ApiError;
pub use gate::{protected_route, public_route, AuthSnapshot, RouteDecision};
pub use http::ApiClient;
pub use session::AuthSession;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};
