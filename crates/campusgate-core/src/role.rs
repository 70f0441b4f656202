// Role taxonomy
//
// Five fixed roles drive both page access and the landing route an
// authenticated account is sent to after login.

use serde::{Deserialize, Serialize};

/// Route public pages redirect unauthenticated users to.
pub const LOGIN_ROUTE: &str = "/login";

/// Landing route used when a session carries no recognizable role.
pub const DEFAULT_LANDING_ROUTE: &str = "/student/dashboard";

/// Account role recognized by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Department,
    Academic,
    HostelOffice,
    Gate,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::Department,
        Role::Academic,
        Role::HostelOffice,
        Role::Gate,
    ];

    /// Wire string as the backend sends it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Department => "department",
            Role::Academic => "academic",
            Role::HostelOffice => "hosteloffice",
            Role::Gate => "gate",
        }
    }

    /// Parse a role string, case-insensitively. Unknown strings yield `None`;
    /// callers decide whether that means "default route" or "access denied".
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "department" => Some(Role::Department),
            "academic" => Some(Role::Academic),
            "hosteloffice" => Some(Role::HostelOffice),
            "gate" => Some(Role::Gate),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Student",
            Role::Department => "Department",
            Role::Academic => "Academic Office",
            Role::HostelOffice => "Hostel Office",
            Role::Gate => "Gate",
        }
    }

    /// Dashboard route this role lands on after login.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Role::User => "/student/dashboard",
            Role::Department => "/department/dashboard",
            Role::Academic => "/academic/dashboard",
            Role::HostelOffice => "/hostel/dashboard",
            Role::Gate => "/gate/dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the landing route for a possibly-absent, possibly-unrecognized
/// role string. Unknown roles fall back to the student dashboard rather than
/// an error state.
pub fn landing_route_for(role: Option<&str>) -> &'static str {
    role.and_then(Role::parse)
        .map(|r| r.landing_route())
        .unwrap_or(DEFAULT_LANDING_ROUTE)
}
