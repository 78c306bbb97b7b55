use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::archetypes::ArchetypeKey;

/// Code recorded for employees who took the assessment without an invite.
pub const PUBLIC_ORG_CODE: &str = "PUBLIC";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// Upper-case invite code, unique across the directory.
    pub code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub code: String,
}

/// Stored outcome of one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub org_code: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub style_score: f64,
    pub readiness_score: f64,
    pub exposure_score: u8,
    pub archetype: ArchetypeKey,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployeeRecord {
    #[serde(default)]
    pub org_code: Option<String>,
    pub name: String,
    pub email: String,
    pub department: String,
    pub style_score: f64,
    pub readiness_score: f64,
    pub exposure_score: u8,
    pub archetype: ArchetypeKey,
}

/// Upper-cases an invite code, mapping a missing or blank one to
/// [`PUBLIC_ORG_CODE`].
pub fn normalize_org_code(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| PUBLIC_ORG_CODE.to_string())
}
