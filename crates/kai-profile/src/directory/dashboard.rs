use serde::Serialize;

use super::domain::EmployeeRecord;
use crate::assessment::archetypes::ArchetypeKey;

/// High risk: role heavily exposed to automation by someone not ready for it.
const HIGH_RISK_EXPOSURE: u8 = 60;
const HIGH_RISK_READINESS: f64 = 50.0;

/// Aggregated view an organization admin sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationDashboard {
    pub org_code: String,
    pub participants: usize,
    pub average_style: f64,
    pub average_readiness: f64,
    pub average_exposure: f64,
    pub high_risk_percent: u8,
    pub pilot_ready_percent: u8,
    pub archetype_distribution: Vec<ArchetypeShare>,
    pub scatter: Vec<EmployeePoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchetypeShare {
    pub archetype: ArchetypeKey,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePoint {
    pub name: String,
    pub department: String,
    pub style_score: f64,
    pub readiness_score: f64,
    pub archetype: ArchetypeKey,
}

impl EmployeeRecord {
    pub fn is_high_risk(&self) -> bool {
        self.exposure_score >= HIGH_RISK_EXPOSURE && self.readiness_score < HIGH_RISK_READINESS
    }

    pub fn is_pilot_ready(&self) -> bool {
        matches!(
            self.archetype,
            ArchetypeKey::VisionaryArchitect | ArchetypeKey::SystemGuardian
        )
    }
}

pub fn build_dashboard(org_code: &str, records: &[EmployeeRecord]) -> OrganizationDashboard {
    let participants = records.len();

    let average = |value: fn(&EmployeeRecord) -> f64| -> f64 {
        if participants == 0 {
            return 0.0;
        }
        records.iter().map(value).sum::<f64>() / participants as f64
    };

    let archetype_distribution = ArchetypeKey::ordered()
        .into_iter()
        .map(|archetype| ArchetypeShare {
            archetype,
            count: records
                .iter()
                .filter(|record| record.archetype == archetype)
                .count(),
        })
        .filter(|share| share.count > 0)
        .collect();

    let scatter = records
        .iter()
        .map(|record| EmployeePoint {
            name: record.name.clone(),
            department: record.department.clone(),
            style_score: record.style_score,
            readiness_score: record.readiness_score,
            archetype: record.archetype,
        })
        .collect();

    OrganizationDashboard {
        org_code: org_code.to_string(),
        participants,
        average_style: average(|record| record.style_score),
        average_readiness: average(|record| record.readiness_score),
        average_exposure: average(|record| f64::from(record.exposure_score)),
        high_risk_percent: percent(
            records.iter().filter(|record| record.is_high_risk()).count(),
            participants,
        ),
        pilot_ready_percent: percent(
            records
                .iter()
                .filter(|record| record.is_pilot_ready())
                .count(),
            participants,
        ),
        archetype_distribution,
        scatter,
    }
}

fn percent(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u8
}
