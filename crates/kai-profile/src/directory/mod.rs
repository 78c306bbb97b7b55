//! Organizations, the assessment results of their employees, and the
//! aggregate dashboard shown to organization admins.

pub mod dashboard;
pub mod domain;
mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use dashboard::{build_dashboard, ArchetypeShare, EmployeePoint, OrganizationDashboard};
pub use domain::{
    normalize_org_code, EmployeeId, EmployeeRecord, NewEmployeeRecord, NewOrganization,
    Organization, OrganizationId, PUBLIC_ORG_CODE,
};
pub use import::ImportError;
pub use repository::{DirectoryStore, RepositoryError};
pub use router::directory_router;
pub use service::{DirectoryError, DirectoryService};
