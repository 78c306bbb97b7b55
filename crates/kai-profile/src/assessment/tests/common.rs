use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::assessment::answers::{AnswerMap, AnswerValue};
use crate::assessment::archetypes::ArchetypeRegistry;
use crate::assessment::catalog::{ids, Question, QuestionCatalog, QuestionType};
use crate::assessment::service::AssessmentService;
use crate::directory::tests::common::MemoryStore;
use crate::directory::DirectoryService;
use crate::leads::{LeadError, LeadPublisher, LeadSubmission};

pub(super) const STYLE_IDS: [&str; 6] = [
    "style_reaction",
    "style_deadline",
    "style_detail",
    "style_consensus",
    "style_structure",
    "style_ideas",
];

pub(super) const EXPOSURE_IDS: [&str; 7] = [
    "exp_data",
    "exp_text",
    "exp_decision",
    "exp_repetitive",
    "exp_creative",
    "exp_physical",
    "exp_human",
];

/// Stores every lead and wakes anyone waiting for one.
#[derive(Default)]
pub(super) struct RecordingPublisher {
    pub(super) leads: Mutex<Vec<LeadSubmission>>,
    pub(super) published: Notify,
}

#[async_trait]
impl LeadPublisher for RecordingPublisher {
    async fn publish(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        self.leads
            .lock()
            .expect("lead mutex poisoned")
            .push(lead.clone());
        self.published.notify_one();
        Ok(())
    }
}

pub(super) type TestService = AssessmentService<MemoryStore, RecordingPublisher>;

pub(super) struct Fixture {
    pub(super) service: Arc<TestService>,
    pub(super) store: Arc<MemoryStore>,
    pub(super) publisher: Arc<RecordingPublisher>,
}

pub(super) fn catalog() -> QuestionCatalog {
    QuestionCatalog::standard()
}

/// Service over an empty store that already knows the DEMO2025 organization.
pub(super) fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::default());
    DirectoryService::new(store.clone())
        .create_organization(crate::directory::tests::common::demo_org())
        .expect("demo organization created");
    let publisher = Arc::new(RecordingPublisher::default());
    let service = Arc::new(AssessmentService::new(
        Arc::new(catalog()),
        Arc::new(ArchetypeRegistry::standard()),
        store.clone(),
        publisher.clone(),
    ));
    Fixture {
        service,
        store,
        publisher,
    }
}

pub(super) fn with_style(weight: f64) -> AnswerMap {
    STYLE_IDS.iter().map(|id| (*id, weight)).collect()
}

/// A plausible answer for any catalog question.
pub(super) fn sample_answer(question: &Question) -> AnswerValue {
    match question.question_type {
        QuestionType::Text => match question.id.as_str() {
            ids::NAME => "Sophie de Vries".into(),
            ids::EMAIL => "sophie@demo.com".into(),
            ids::ORG_CODE => "demo2025".into(),
            _ => "Marketing".into(),
        },
        QuestionType::Select | QuestionType::Scenario => question
            .options
            .last()
            .map(|option| option.value.clone())
            .unwrap_or(AnswerValue::Number(0.0)),
        QuestionType::Scale => AnswerValue::Number(4.0),
        QuestionType::Slider => AnswerValue::Number(60.0),
    }
}

/// Every catalog question answered with [`sample_answer`].
pub(super) fn complete_answers(catalog: &QuestionCatalog) -> AnswerMap {
    catalog
        .questions()
        .iter()
        .map(|question| (question.id.clone(), sample_answer(question)))
        .collect()
}
