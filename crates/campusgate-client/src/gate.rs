// Route authorization gates
//
// Pure decision functions: a snapshot of the auth session goes in, a
// render-or-redirect decision comes out. The gates own no state of their
// own, which is what makes them trivially testable.

use campusgate_core::{landing_route_for, LOGIN_ROUTE};
use serde::Serialize;

/// Point-in-time view of the auth session, as route decisions need it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthSnapshot {
    pub loading: bool,
    pub token: Option<String>,
    pub role: Option<String>,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// What the caller should do with a guarded surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Hydration is still running; show a neutral placeholder.
    Loading,
    /// Authenticated but the role is not known yet.
    VerifyingAccess,
    /// Navigate away. `replace` means the guarded location must not remain
    /// in history.
    Redirect { to: String, replace: bool },
    /// Authenticated with the wrong role. Terminal: shown in place, no
    /// navigation.
    Denied {
        required: Vec<String>,
        actual: Option<String>,
    },
    /// Render the guarded content.
    Render,
}

/// Gate for surfaces that require a session, optionally restricted to a set
/// of roles. Role comparison is case-insensitive.
pub fn protected_route(auth: &AuthSnapshot, allowed_roles: &[&str]) -> RouteDecision {
    if auth.loading {
        return RouteDecision::Loading;
    }

    if !auth.is_authenticated() {
        return RouteDecision::Redirect {
            to: LOGIN_ROUTE.to_string(),
            replace: true,
        };
    }

    if !allowed_roles.is_empty() {
        let Some(role) = auth.role.as_deref() else {
            return RouteDecision::VerifyingAccess;
        };

        let role_lower = role.to_lowercase();
        let permitted = allowed_roles
            .iter()
            .any(|allowed| allowed.to_lowercase() == role_lower);
        if !permitted {
            return RouteDecision::Denied {
                required: allowed_roles.iter().map(|r| r.to_string()).collect(),
                actual: Some(role.to_string()),
            };
        }
    }

    RouteDecision::Render
}

/// Gate for surfaces that only make sense signed out (login, register).
/// An authenticated visitor is sent to their role's landing route.
pub fn public_route(auth: &AuthSnapshot) -> RouteDecision {
    if auth.loading {
        return RouteDecision::Loading;
    }

    if auth.is_authenticated() {
        return RouteDecision::Redirect {
            to: landing_route_for(auth.role.as_deref()).to_string(),
            replace: true,
        };
    }

    RouteDecision::Render
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authed(role: Option<&str>) -> AuthSnapshot {
        AuthSnapshot {
            loading: false,
            token: Some("tok1".to_string()),
            role: role.map(str::to_string),
        }
    }

    fn anonymous() -> AuthSnapshot {
        AuthSnapshot {
            loading: false,
            token: None,
            role: None,
        }
    }

    #[test]
    fn test_loading_suspends_both_gates() {
        let loading = AuthSnapshot {
            loading: true,
            ..AuthSnapshot::default()
        };
        assert_eq!(protected_route(&loading, &["user"]), RouteDecision::Loading);
        assert_eq!(public_route(&loading), RouteDecision::Loading);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let decision = protected_route(&anonymous(), &[]);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                to: "/login".to_string(),
                replace: true,
            }
        );
        // Role requirements don't change the answer when there is no token
        assert_eq!(protected_route(&anonymous(), &["gate"]), decision);
    }

    #[test]
    fn test_unauthenticated_renders_public() {
        assert_eq!(public_route(&anonymous()), RouteDecision::Render);
    }

    #[test]
    fn test_role_mismatch_denies_in_place() {
        let decision = protected_route(&authed(Some("department")), &["academic"]);
        assert_eq!(
            decision,
            RouteDecision::Denied {
                required: vec!["academic".to_string()],
                actual: Some("department".to_string()),
            }
        );
    }

    #[test]
    fn test_role_check_is_case_insensitive() {
        assert_eq!(
            protected_route(&authed(Some("Department")), &["department"]),
            RouteDecision::Render
        );
        assert_eq!(
            protected_route(&authed(Some("gate")), &["GATE"]),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_unresolved_role_shows_verifying() {
        assert_eq!(
            protected_route(&authed(None), &["user"]),
            RouteDecision::VerifyingAccess
        );
        // No role requirement: render without waiting for a role
        assert_eq!(protected_route(&authed(None), &[]), RouteDecision::Render);
    }

    #[test]
    fn test_public_redirects_by_role() {
        for (role, route) in [
            ("user", "/student/dashboard"),
            ("department", "/department/dashboard"),
            ("academic", "/academic/dashboard"),
            ("hosteloffice", "/hostel/dashboard"),
            ("gate", "/gate/dashboard"),
        ] {
            assert_eq!(
                public_route(&authed(Some(role))),
                RouteDecision::Redirect {
                    to: route.to_string(),
                    replace: true,
                }
            );
        }
    }

    #[test]
    fn test_public_redirect_unknown_role_falls_back() {
        // An unrecognized role routes to the default landing, not an error
        assert_eq!(
            public_route(&authed(Some("warden"))),
            RouteDecision::Redirect {
                to: "/student/dashboard".to_string(),
                replace: true,
            }
        );
        assert_eq!(
            public_route(&authed(None)),
            RouteDecision::Redirect {
                to: "/student/dashboard".to_string(),
                replace: true,
            }
        );
    }
}
