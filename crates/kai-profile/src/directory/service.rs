use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::dashboard::{build_dashboard, OrganizationDashboard};
use super::domain::{
    normalize_org_code, EmployeeId, EmployeeRecord, NewEmployeeRecord, NewOrganization,
    Organization, OrganizationId, PUBLIC_ORG_CODE,
};
use super::import::{parse_employee_rows, ImportError};
use super::repository::{DirectoryStore, RepositoryError};

/// Organization and employee-result management on top of a [`DirectoryStore`].
pub struct DirectoryService<S> {
    store: Arc<S>,
}

static ORGANIZATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static EMPLOYEE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_organization_id() -> OrganizationId {
    let id = ORGANIZATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrganizationId(format!("org-{id:06}"))
}

fn next_employee_id() -> EmployeeId {
    let id = EMPLOYEE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EmployeeId(format!("emp-{id:06}"))
}

impl<S> DirectoryService<S>
where
    S: DirectoryStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn create_organization(
        &self,
        request: NewOrganization,
    ) -> Result<Organization, DirectoryError> {
        let name = request.name.trim();
        let code = request.code.trim().to_uppercase();
        if name.is_empty() {
            return Err(DirectoryError::BlankField("name"));
        }
        if code.is_empty() {
            return Err(DirectoryError::BlankField("code"));
        }
        if code == PUBLIC_ORG_CODE {
            return Err(DirectoryError::ReservedCode(code));
        }

        let organization = Organization {
            id: next_organization_id(),
            name: name.to_string(),
            code,
            created_at: Utc::now(),
        };
        let stored = self.store.insert_organization(organization)?;
        info!(org_id = %stored.id.0, code = %stored.code, "organization created");
        Ok(stored)
    }

    pub fn delete_organization(&self, id: &OrganizationId) -> Result<(), DirectoryError> {
        self.store.remove_organization(id)?;
        info!(org_id = %id.0, "organization deleted");
        Ok(())
    }

    pub fn organizations(&self) -> Result<Vec<Organization>, DirectoryError> {
        Ok(self.store.organizations()?)
    }

    /// Case-insensitive lookup of an invite code.
    pub fn find_by_code(&self, code: &str) -> Result<Option<Organization>, DirectoryError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(self.store.organization_by_code(&code)?)
    }

    pub fn record_result(
        &self,
        request: NewEmployeeRecord,
    ) -> Result<EmployeeRecord, DirectoryError> {
        if request.name.trim().is_empty() {
            return Err(DirectoryError::BlankField("name"));
        }
        if request.email.trim().is_empty() {
            return Err(DirectoryError::BlankField("email"));
        }

        let record = EmployeeRecord {
            id: next_employee_id(),
            org_code: normalize_org_code(request.org_code.as_deref()),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            department: request.department,
            style_score: request.style_score,
            readiness_score: request.readiness_score,
            exposure_score: request.exposure_score,
            archetype: request.archetype,
            completed_at: Utc::now(),
        };
        let stored = self.store.insert_employee(record)?;
        info!(
            employee_id = %stored.id.0,
            org_code = %stored.org_code,
            archetype = %stored.archetype,
            "employee result recorded"
        );
        Ok(stored)
    }

    pub fn delete_employee(&self, id: &EmployeeId) -> Result<(), DirectoryError> {
        self.store.remove_employee(id)?;
        info!(employee_id = %id.0, "employee result deleted");
        Ok(())
    }

    pub fn employees(&self, org_code: &str) -> Result<Vec<EmployeeRecord>, DirectoryError> {
        let code = self.known_code(org_code)?;
        Ok(self.store.employees_in(&code)?)
    }

    pub fn dashboard(&self, org_code: &str) -> Result<OrganizationDashboard, DirectoryError> {
        let code = self.known_code(org_code)?;
        let records = self.store.employees_in(&code)?;
        Ok(build_dashboard(&code, &records))
    }

    /// Imports CSV rows for an existing organization. Rows are validated up
    /// front so a bad file records nothing.
    pub fn import_csv<R: Read>(
        &self,
        org_code: &str,
        reader: R,
    ) -> Result<Vec<EmployeeRecord>, DirectoryError> {
        let code = self.known_code(org_code)?;
        let rows = parse_employee_rows(reader, &code)?;

        let imported = rows
            .into_iter()
            .map(|row| self.record_result(row))
            .collect::<Result<Vec<_>, _>>()?;
        info!(org_code = %code, imported = imported.len(), "employee csv imported");
        Ok(imported)
    }

    /// Upper-cased code of an existing organization; `PUBLIC` always resolves.
    fn known_code(&self, org_code: &str) -> Result<String, DirectoryError> {
        let code = normalize_org_code(Some(org_code));
        if code == PUBLIC_ORG_CODE || self.store.organization_by_code(&code)?.is_some() {
            Ok(code)
        } else {
            Err(DirectoryError::UnknownOrganization(code))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("{0} must not be blank")]
    BlankField(&'static str),
    #[error("organization code '{0}' is reserved")]
    ReservedCode(String),
    #[error("unknown organization code '{0}'")]
    UnknownOrganization(String),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
