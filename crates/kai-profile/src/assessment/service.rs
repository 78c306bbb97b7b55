use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::answers::AnswerMap;
use super::archetypes::ArchetypeRegistry;
use super::catalog::{Question, QuestionCatalog};
use super::flow::{AssessmentPlan, AssessmentSession, FlowError, SessionStatus};
use super::profile::ProfileReport;
use super::progress::{ProgressSnapshot, ProgressStore};
use super::scoring::ScoringEngine;
use crate::directory::{
    normalize_org_code, DirectoryError, DirectoryService, DirectoryStore, EmployeeRecord,
    NewEmployeeRecord, RepositoryError, PUBLIC_ORG_CODE,
};
use crate::leads::{spawn_lead_submission, LeadPublisher, LeadSubmission};

/// Client-held session state sent with every step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvanceRequest {
    #[serde(flatten)]
    pub plan: AssessmentPlan,
    #[serde(default)]
    pub step: usize,
    #[serde(default)]
    pub initial_step: usize,
    #[serde(default)]
    pub answers: AnswerMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvanceResponse {
    pub status: SessionStatus,
    pub step: usize,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ProfileReport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteRequest {
    pub answers: AnswerMap,
    #[serde(default)]
    pub progress_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub report: ProfileReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRecord>,
    pub lead_submitted: bool,
}

/// Runs assessments against the catalog and files completed results.
pub struct AssessmentService<S, L> {
    catalog: Arc<QuestionCatalog>,
    engine: Arc<ScoringEngine>,
    registry: Arc<ArchetypeRegistry>,
    store: Arc<S>,
    directory: DirectoryService<S>,
    leads: Arc<L>,
}

impl<S, L> AssessmentService<S, L>
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        registry: Arc<ArchetypeRegistry>,
        store: Arc<S>,
        leads: Arc<L>,
    ) -> Self {
        Self::with_engine(
            catalog,
            Arc::new(ScoringEngine::standard()),
            registry,
            store,
            leads,
        )
    }

    pub fn with_engine(
        catalog: Arc<QuestionCatalog>,
        engine: Arc<ScoringEngine>,
        registry: Arc<ArchetypeRegistry>,
        store: Arc<S>,
        leads: Arc<L>,
    ) -> Self {
        Self {
            catalog,
            engine,
            registry,
            directory: DirectoryService::new(store.clone()),
            store,
            leads,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ArchetypeRegistry {
        &self.registry
    }

    pub fn questions(&self, plan: AssessmentPlan) -> Vec<Question> {
        self.catalog
            .active_questions(plan.mode, plan.limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn report(&self, answers: &AnswerMap) -> ProfileReport {
        ProfileReport::from_answers(&self.catalog, &self.engine, &self.registry, answers)
    }

    /// Validates the current step and returns the next question, or the
    /// report once the last question is answered.
    pub fn advance(&self, request: AdvanceRequest) -> Result<AdvanceResponse, FlowError> {
        let mut session = AssessmentSession::with_state(
            &self.catalog,
            request.plan,
            request.step,
            request.initial_step,
            request.answers,
        );
        session.advance(self.store.as_ref())?;

        let report = session
            .is_complete()
            .then(|| self.report(session.answers()));
        Ok(AdvanceResponse {
            status: session.status(),
            step: session.step(),
            progress_percent: session.progress_percent(),
            question: session.current_question().cloned(),
            report,
        })
    }

    /// Scores the answers, files identified results in the directory, hands
    /// the lead off in the background and drops saved progress.
    pub fn complete(
        &self,
        request: CompleteRequest,
    ) -> Result<CompletionOutcome, AssessmentServiceError> {
        let report = self.report(&request.answers);
        self.ensure_known_organization(report.context.org_code.as_deref())?;

        let employee = match (&report.context.name, &report.context.email) {
            (Some(name), Some(email)) => Some(self.directory.record_result(NewEmployeeRecord {
                org_code: report.context.org_code.clone(),
                name: name.clone(),
                email: email.clone(),
                department: report.context.department.clone(),
                style_score: report.scores.style_score,
                readiness_score: report.scores.readiness_score,
                exposure_score: report.scores.exposure_score,
                archetype: report.scores.archetype,
            })?),
            _ => None,
        };

        let lead_submitted = match LeadSubmission::from_report(&report) {
            Some(lead) => {
                spawn_lead_submission(self.leads.clone(), lead);
                true
            }
            None => false,
        };

        if let Some(key) = &request.progress_key {
            self.store.clear_progress(key)?;
        }

        info!(
            archetype = %report.scores.archetype,
            recorded = employee.is_some(),
            "assessment completed"
        );
        Ok(CompletionOutcome {
            report,
            employee,
            lead_submitted,
        })
    }

    /// A given invite code must name an existing organization or `PUBLIC`.
    fn ensure_known_organization(&self, code: Option<&str>) -> Result<(), AssessmentServiceError> {
        let code = normalize_org_code(code);
        if code == PUBLIC_ORG_CODE || self.directory.find_by_code(&code)?.is_some() {
            return Ok(());
        }
        Err(FlowError::UnknownOrganization { code }.into())
    }

    pub fn load_progress(&self, key: &str) -> Result<Option<ProgressSnapshot>, RepositoryError> {
        self.store.load_progress(key)
    }

    pub fn save_progress(
        &self,
        key: &str,
        step: usize,
        answers: AnswerMap,
    ) -> Result<ProgressSnapshot, RepositoryError> {
        let snapshot = ProgressSnapshot {
            step,
            answers,
            saved_at: Utc::now(),
        };
        self.store.save_progress(key, snapshot.clone())?;
        Ok(snapshot)
    }

    pub fn clear_progress(&self, key: &str) -> Result<(), RepositoryError> {
        self.store.clear_progress(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}
