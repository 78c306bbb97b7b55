use super::domain::{EmployeeId, EmployeeRecord, Organization, OrganizationId};

/// Storage abstraction for organizations and their employees' results.
pub trait DirectoryStore: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the code is taken.
    fn insert_organization(&self, organization: Organization)
        -> Result<Organization, RepositoryError>;
    fn remove_organization(&self, id: &OrganizationId) -> Result<(), RepositoryError>;
    fn organizations(&self) -> Result<Vec<Organization>, RepositoryError>;
    fn organization_by_code(&self, code: &str) -> Result<Option<Organization>, RepositoryError>;
    fn insert_employee(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError>;
    fn remove_employee(&self, id: &EmployeeId) -> Result<(), RepositoryError>;
    fn employees_in(&self, org_code: &str) -> Result<Vec<EmployeeRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
