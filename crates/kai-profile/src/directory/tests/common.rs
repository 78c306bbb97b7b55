use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::assessment::archetypes::ArchetypeKey;
use crate::assessment::progress::{ProgressSnapshot, ProgressStore};
use crate::directory::domain::{
    EmployeeId, EmployeeRecord, NewEmployeeRecord, NewOrganization, Organization, OrganizationId,
};
use crate::directory::repository::{DirectoryStore, RepositoryError};
use crate::directory::service::DirectoryService;

/// In-memory directory and progress store shared by the crate's unit tests.
#[derive(Default, Clone)]
pub(crate) struct MemoryStore {
    pub(crate) organizations: Arc<Mutex<HashMap<OrganizationId, Organization>>>,
    pub(crate) employees: Arc<Mutex<Vec<EmployeeRecord>>>,
    pub(crate) progress: Arc<Mutex<HashMap<String, ProgressSnapshot>>>,
}

impl DirectoryStore for MemoryStore {
    fn insert_organization(
        &self,
        organization: Organization,
    ) -> Result<Organization, RepositoryError> {
        let mut guard = self.organizations.lock().expect("directory mutex poisoned");
        if guard.values().any(|existing| existing.code == organization.code) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(organization.id.clone(), organization.clone());
        Ok(organization)
    }

    fn remove_organization(&self, id: &OrganizationId) -> Result<(), RepositoryError> {
        let mut guard = self.organizations.lock().expect("directory mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn organizations(&self) -> Result<Vec<Organization>, RepositoryError> {
        let guard = self.organizations.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn organization_by_code(&self, code: &str) -> Result<Option<Organization>, RepositoryError> {
        let guard = self.organizations.lock().expect("directory mutex poisoned");
        Ok(guard.values().find(|org| org.code == code).cloned())
    }

    fn insert_employee(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = self.employees.lock().expect("directory mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn remove_employee(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut guard = self.employees.lock().expect("directory mutex poisoned");
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn employees_in(&self, org_code: &str) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        let guard = self.employees.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.org_code == org_code)
            .cloned()
            .collect())
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self, key: &str) -> Result<Option<ProgressSnapshot>, RepositoryError> {
        let guard = self.progress.lock().expect("progress mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn save_progress(&self, key: &str, snapshot: ProgressSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.progress.lock().expect("progress mutex poisoned");
        guard.insert(key.to_string(), snapshot);
        Ok(())
    }

    fn clear_progress(&self, key: &str) -> Result<(), RepositoryError> {
        let mut guard = self.progress.lock().expect("progress mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

pub(crate) struct UnavailableStore;

impl DirectoryStore for UnavailableStore {
    fn insert_organization(&self, _organization: Organization) -> Result<Organization, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_organization(&self, _id: &OrganizationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn organizations(&self) -> Result<Vec<Organization>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn organization_by_code(&self, _code: &str) -> Result<Option<Organization>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_employee(&self, _record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_employee(&self, _id: &EmployeeId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn employees_in(&self, _org_code: &str) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(crate) fn build_service() -> (DirectoryService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (DirectoryService::new(store.clone()), store)
}

pub(crate) fn demo_org() -> NewOrganization {
    NewOrganization {
        name: "Demo Corp".to_string(),
        code: "demo2025".to_string(),
    }
}

pub(crate) fn employee(
    name: &str,
    department: &str,
    style_score: f64,
    readiness_score: f64,
    exposure_score: u8,
    archetype: ArchetypeKey,
) -> NewEmployeeRecord {
    NewEmployeeRecord {
        org_code: Some("DEMO2025".to_string()),
        name: name.to_string(),
        email: format!("{}@demo.com", name.split_whitespace().next().unwrap_or(name).to_lowercase()),
        department: department.to_string(),
        style_score,
        readiness_score,
        exposure_score,
        archetype,
    }
}

/// The seven colleagues of the demo organization.
pub(crate) fn demo_employees() -> Vec<NewEmployeeRecord> {
    vec![
        employee("Jan Jansen", "Finance", -6.0, 85.0, 80, ArchetypeKey::SystemGuardian),
        employee("Sophie de Vries", "Marketing", 8.0, 92.0, 60, ArchetypeKey::VisionaryArchitect),
        employee("Pieter Bakker", "Operations", -7.0, 30.0, 40, ArchetypeKey::PracticalTraditionalist),
        employee("Emma Visser", "Sales", 5.0, 45.0, 50, ArchetypeKey::CreativeExperimenter),
        employee("Ahmet Yilmaz", "IT", 2.0, 70.0, 55, ArchetypeKey::StrategicIntegrator),
        employee("Lisa de Jong", "HR", 0.0, 65.0, 30, ArchetypeKey::PragmaticBridge),
        employee("Karel Visser", "Legal", -5.0, 20.0, 20, ArchetypeKey::ResistantSkeptic),
    ]
}
