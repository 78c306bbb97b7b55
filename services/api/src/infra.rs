use async_trait::async_trait;
use kai_profile::assessment::{ArchetypeKey, ProgressSnapshot, ProgressStore};
use kai_profile::config::LeadConfig;
use kai_profile::directory::{
    DirectoryError, DirectoryService, DirectoryStore, EmployeeId, EmployeeRecord,
    NewEmployeeRecord, NewOrganization, Organization, OrganizationId, RepositoryError,
};
use kai_profile::leads::{LeadError, LeadPublisher, LeadSubmission, WebhookLeadPublisher};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub(crate) const DEMO_ORG_CODE: &str = "DEMO2025";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store for organizations, results and saved progress.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    organizations: Arc<Mutex<HashMap<OrganizationId, Organization>>>,
    employees: Arc<Mutex<Vec<EmployeeRecord>>>,
    progress: Arc<Mutex<HashMap<String, ProgressSnapshot>>>,
}

impl DirectoryStore for InMemoryStore {
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
        let mut organizations: Vec<_> = guard.values().cloned().collect();
        organizations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(organizations)
    }

    fn organization_by_code(&self, code: &str) -> Result<Option<Organization>, RepositoryError> {
        let guard = self.organizations.lock().expect("directory mutex poisoned");
        Ok(guard.values().find(|org| org.code == code).cloned())
    }

    fn insert_employee(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = self.employees.lock().expect("employee mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn remove_employee(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut guard = self.employees.lock().expect("employee mutex poisoned");
        let before = guard.len();
        guard.retain(|record| &record.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn employees_in(&self, org_code: &str) -> Result<Vec<EmployeeRecord>, RepositoryError> {
        let guard = self.employees.lock().expect("employee mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.org_code == org_code)
            .cloned()
            .collect())
    }
}

impl ProgressStore for InMemoryStore {
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

/// Lead delivery chosen from [`LeadConfig`]: a webhook, or nothing.
pub(crate) enum ConfiguredLeadPublisher {
    Webhook(WebhookLeadPublisher),
    Disabled,
}

impl ConfiguredLeadPublisher {
    pub(crate) fn from_config(config: &LeadConfig) -> Self {
        match &config.webhook_url {
            Some(url) => Self::Webhook(WebhookLeadPublisher::new(url.clone())),
            None => Self::Disabled,
        }
    }
}

#[async_trait]
impl LeadPublisher for ConfiguredLeadPublisher {
    async fn publish(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        match self {
            Self::Webhook(webhook) => webhook.publish(lead).await,
            Self::Disabled => {
                debug!(archetype = %lead.archetype, "lead webhook disabled; dropping lead");
                Ok(())
            }
        }
    }
}

/// Creates Demo Corp and its seven colleagues. Safe to call once per store.
pub(crate) fn seed_demo_directory<S>(directory: &DirectoryService<S>) -> Result<(), DirectoryError>
where
    S: DirectoryStore + 'static,
{
    directory.create_organization(NewOrganization {
        name: "Demo Corp".to_string(),
        code: DEMO_ORG_CODE.to_string(),
    })?;
    for record in demo_employees() {
        directory.record_result(record)?;
    }
    Ok(())
}

fn demo_employees() -> Vec<NewEmployeeRecord> {
    let employee = |name: &str,
                    email: &str,
                    department: &str,
                    style_score: f64,
                    readiness_score: f64,
                    exposure_score: u8,
                    archetype: ArchetypeKey| NewEmployeeRecord {
        org_code: Some(DEMO_ORG_CODE.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        department: department.to_string(),
        style_score,
        readiness_score,
        exposure_score,
        archetype,
    };

    vec![
        employee("Jan Jansen", "jan@demo.com", "Finance", -6.0, 85.0, 80, ArchetypeKey::SystemGuardian),
        employee("Sophie de Vries", "sophie@demo.com", "Marketing", 8.0, 92.0, 60, ArchetypeKey::VisionaryArchitect),
        employee("Pieter Bakker", "pieter@demo.com", "Operations", -7.0, 30.0, 40, ArchetypeKey::PracticalTraditionalist),
        employee("Emma Visser", "emma@demo.com", "Sales", 5.0, 45.0, 50, ArchetypeKey::CreativeExperimenter),
        employee("Ahmet Yilmaz", "ahmet@demo.com", "IT", 2.0, 70.0, 55, ArchetypeKey::StrategicIntegrator),
        employee("Lisa de Jong", "lisa@demo.com", "HR", 0.0, 65.0, 30, ArchetypeKey::PragmaticBridge),
        employee("Karel Visser", "karel@demo.com", "Legal", -5.0, 20.0, 20, ArchetypeKey::ResistantSkeptic),
    ]
}
