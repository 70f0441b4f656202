// Command modules
//
// Every authenticated command goes through the same route decision the web
// UI's guards use before it touches the backend.

use anyhow::{bail, Result};
use campusgate_client::{protected_route, AuthSession, RouteDecision};

pub mod approvals;
pub mod auth;
pub mod passes;
pub mod scan;

/// Require a signed-in session, optionally restricted to a role set.
/// A missing session is the CLI's redirect-to-login; a role mismatch is
/// reported in place, matching the access-denied page.
pub fn ensure_access(session: &AuthSession, allowed_roles: &[&str]) -> Result<()> {
    match protected_route(&session.snapshot(), allowed_roles) {
        RouteDecision::Render => Ok(()),
        RouteDecision::Redirect { .. } => {
            bail!("Not signed in. Run `campusgate login` first.")
        }
        RouteDecision::Denied { required, actual } => bail!(
            "Access denied. Required role: {}. Your role: {}.",
            required.join(", "),
            actual.unwrap_or_else(|| "unknown".to_string())
        ),
        RouteDecision::VerifyingAccess => {
            bail!("Could not determine your role. Sign in again with `campusgate login`.")
        }
        RouteDecision::Loading => bail!("Session is still loading. Try again."),
    }
}
