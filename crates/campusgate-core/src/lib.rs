// CampusGate domain types
//
// This crate holds the types shared by the client library and the CLI:
// the role taxonomy and its landing routes, pass types and statuses, the
// loosely-typed user profile, and the best-effort token claim decoder.
//
// Key design decisions:
// - Role is a closed five-value enum; unrecognized role strings are carried
//   as-is by callers and resolved to the default landing route
// - Wire types tolerate absent fields so backend shape changes don't break
//   deserialization
// - decode_role_claim never errors outward; an undecodable token simply
//   yields no role

pub mod claims;
pub mod pass;
pub mod role;
pub mod user;

pub use claims::decode_role_claim;
pub use pass::{ApprovalStatus, Pass, PassStatus, PassType, DEPARTMENTS};
pub use role::{landing_route_for, Role, DEFAULT_LANDING_ROUTE, LOGIN_ROUTE};
pub use user::UserProfile;
