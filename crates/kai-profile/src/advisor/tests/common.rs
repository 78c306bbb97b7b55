use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::advisor::chat::ChatContext;
use crate::advisor::client::{AdvisorError, GenerationRequest, TextGenerator};
use crate::advisor::roadmap::{Roadmap, RoadmapContext};
use crate::advisor::service::AdvisorService;
use crate::assessment::archetypes::{ArchetypeKey, ArchetypeRegistry};
use crate::config::AdvisorConfig;

pub(super) fn registry() -> Arc<ArchetypeRegistry> {
    Arc::new(ArchetypeRegistry::standard())
}

pub(super) fn service_with(generator: Arc<dyn TextGenerator>) -> AdvisorService {
    AdvisorService::new(generator, registry(), &AdvisorConfig::default())
}

pub(super) fn roadmap_context() -> RoadmapContext {
    RoadmapContext {
        role: "Marketing lead".to_string(),
        department: "Marketing".to_string(),
        industry: "Media".to_string(),
        experience: "Senior".to_string(),
        org_size: "Medium".to_string(),
        archetype: ArchetypeKey::VisionaryArchitect,
        style_label: "Innovative".to_string(),
        readiness_score: 92.0,
        anxiety_raw: 1.0,
    }
}

pub(super) fn chat_context() -> ChatContext {
    ChatContext {
        name: "Sophie".to_string(),
        role: "Marketing lead".to_string(),
        department: "Marketing".to_string(),
        industry: "Media".to_string(),
        org_size: "Medium".to_string(),
        archetype: ArchetypeKey::VisionaryArchitect,
        readiness_score: 92.0,
        style_score: 8.0,
        exposure_score: 60,
        roadmap: Some(Roadmap::fallback()),
    }
}

pub(super) enum Script {
    Reply(String),
    Fail,
}

/// Plays back canned replies in order and records every request.
#[derive(Default)]
pub(super) struct ScriptedGenerator {
    script: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub(super) fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AdvisorError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request);
        let next = self
            .script
            .lock()
            .expect("script mutex poisoned")
            .pop_front();
        match next {
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail) | None => Err(AdvisorError::Status {
                status: 503,
                body: "overloaded".to_string(),
            }),
        }
    }
}

/// Signals when a call starts and holds it until released.
#[derive(Default)]
pub(super) struct GatedGenerator {
    pub(super) started: Notify,
    pub(super) release: Notify,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, AdvisorError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok("Released reply".to_string())
    }
}

/// Signals when a call starts and never finishes.
#[derive(Default)]
pub(super) struct PendingGenerator {
    pub(super) started: Notify,
}

#[async_trait]
impl TextGenerator for PendingGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, AdvisorError> {
        self.started.notify_one();
        std::future::pending::<Result<String, AdvisorError>>().await
    }
}
