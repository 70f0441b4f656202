// Gate pass domain types
//
// These mirror the backend's wire vocabulary. The approval chain itself is
// backend-owned; the client only displays statuses and submits requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Departments accepted by the backend. Must match the server-side enum.
pub const DEPARTMENTS: [&str; 6] = [
    "CSE",
    "Chemical",
    "Petroleum",
    "Electronics",
    "Mathematics",
    "Mechanical",
];

/// Kind of gate pass a student can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassType {
    OutOfStation,
    Local,
    TeaCoffee,
}

impl PassType {
    pub fn label(&self) -> &'static str {
        match self {
            PassType::OutOfStation => "Out of Station",
            PassType::Local => "Local",
            PassType::TeaCoffee => "Tea/Coffee",
        }
    }
}

impl std::fmt::Display for PassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a pass currently sits in the approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassStatus {
    PendingDepartment,
    PendingAcademic,
    PendingHostel,
    Approved,
    Rejected,
}

impl PassStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PassStatus::PendingDepartment => "Pending (Department)",
            PassStatus::PendingAcademic => "Pending (Academic)",
            PassStatus::PendingHostel => "Pending (Hostel)",
            PassStatus::Approved => "Approved",
            PassStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single approval stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A gate pass as the backend returns it. Field set varies with pass type
/// and approval stage, so everything beyond the basics is optional and
/// unknown fields are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pass {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "passType")]
    pub pass_type: PassType,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, rename = "fromDate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "toDate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PassStatus>,
    #[serde(default, rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
