use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::chat::{ChatContext, ChatError, ChatSession};
use super::client::{AdvisorError, GeminiClient, GenerationRequest, TextGenerator};
use super::roadmap::{roadmap_prompt, Roadmap, RoadmapContext, RoadmapOutcome, RoadmapSource};
use crate::assessment::archetypes::ArchetypeRegistry;
use crate::config::AdvisorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("advisor request cancelled")]
pub struct Cancelled;

/// Generator used when no api key is configured; every call fails so the
/// advisor falls back.
struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, AdvisorError> {
        Err(AdvisorError::MissingApiKey)
    }
}

struct ChatEntry {
    session: tokio::sync::Mutex<ChatSession>,
    cancel: CancellationToken,
    last_used: AtomicU64,
}

static CHAT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_chat_id() -> String {
    let id = CHAT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("chat-{id:06}")
}

/// Roadmap generation and chat sessions against a [`TextGenerator`].
pub struct AdvisorService {
    generator: Arc<dyn TextGenerator>,
    registry: Arc<ArchetypeRegistry>,
    roadmap_model: String,
    chat_model: String,
    root: CancellationToken,
    chats: Mutex<HashMap<String, Arc<ChatEntry>>>,
    max_open_chats: usize,
    usage: AtomicU64,
}

impl AdvisorService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        registry: Arc<ArchetypeRegistry>,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            generator,
            registry,
            roadmap_model: config.roadmap_model.clone(),
            chat_model: config.chat_model.clone(),
            root: CancellationToken::new(),
            chats: Mutex::new(HashMap::new()),
            max_open_chats: config.max_open_chats.max(1),
            usage: AtomicU64::new(0),
        }
    }

    /// Uses Gemini when an api key is configured, otherwise runs offline.
    pub fn from_config(
        config: &AdvisorConfig,
        registry: Arc<ArchetypeRegistry>,
    ) -> Result<Self, AdvisorError> {
        let generator: Arc<dyn TextGenerator> = match config.api_key {
            Some(_) => Arc::new(GeminiClient::new(config)?),
            None => {
                warn!("GEMINI_API_KEY not set; roadmaps use the fallback plan");
                Arc::new(OfflineGenerator)
            }
        };
        Ok(Self::new(generator, registry, config))
    }

    pub fn offline(registry: Arc<ArchetypeRegistry>) -> Self {
        Self::new(Arc::new(OfflineGenerator), registry, &AdvisorConfig::default())
    }

    /// Token every advisor request derives from.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.root
    }

    /// Cancels all in-flight advisor requests.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    /// Any generation or parse failure yields the fallback plan; only
    /// cancellation is surfaced.
    pub async fn generate_roadmap(
        &self,
        context: &RoadmapContext,
        cancel: &CancellationToken,
    ) -> Result<RoadmapOutcome, Cancelled> {
        let archetype = self.registry.get(context.archetype);
        let request = GenerationRequest {
            json_response: true,
            ..GenerationRequest::prompt(&self.roadmap_model, roadmap_prompt(context, archetype))
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled),
            _ = self.root.cancelled() => return Err(Cancelled),
            result = self.generator.generate(request) => result,
        };

        let outcome = match result.and_then(|raw| Roadmap::parse(&raw)) {
            Ok(roadmap) => RoadmapOutcome {
                roadmap,
                source: RoadmapSource::Generated,
            },
            Err(err) => {
                warn!(error = %err, archetype = %context.archetype, "roadmap generation failed, using fallback");
                RoadmapOutcome {
                    roadmap: Roadmap::fallback(),
                    source: RoadmapSource::Fallback,
                }
            }
        };
        Ok(outcome)
    }

    pub fn chat_session(&self, context: &ChatContext) -> ChatSession {
        ChatSession::new(
            self.generator.clone(),
            self.chat_model.clone(),
            context,
            self.registry.get(context.archetype),
        )
    }

    /// Registers a new chat and returns its id and greeting. Past the
    /// configured limit the least recently used chat is cancelled and dropped.
    pub fn open_chat(&self, context: &ChatContext) -> Result<(String, String), ChatRequestError> {
        let session = self.chat_session(context);
        let greeting = session.greeting().to_string();
        let id = next_chat_id();
        let entry = Arc::new(ChatEntry {
            session: tokio::sync::Mutex::new(session),
            cancel: self.root.child_token(),
            last_used: AtomicU64::new(self.tick()),
        });

        let mut chats = self.chats.lock().map_err(|_| ChatRequestError::Unavailable)?;
        chats.insert(id.clone(), entry);
        while chats.len() > self.max_open_chats {
            let Some(stale) = chats
                .iter()
                .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            if let Some(evicted) = chats.remove(&stale) {
                evicted.cancel.cancel();
                info!(chat_id = %stale, "idle chat session evicted");
            }
        }
        drop(chats);

        info!(chat_id = %id, archetype = %context.archetype, "chat session opened");
        Ok((id, greeting))
    }

    /// Rejects a second message while a reply is still pending.
    pub async fn send_chat(&self, id: &str, text: &str) -> Result<String, ChatRequestError> {
        let entry = self.chat_entry(id)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        let mut session = entry
            .session
            .try_lock()
            .map_err(|_| ChatRequestError::ReplyPending)?;
        Ok(session.send(text, &entry.cancel).await?)
    }

    /// Cancels any pending reply and forgets the session.
    pub fn close_chat(&self, id: &str) -> Result<(), ChatRequestError> {
        let entry = self
            .chats
            .lock()
            .map_err(|_| ChatRequestError::Unavailable)?
            .remove(id)
            .ok_or(ChatRequestError::UnknownSession)?;
        entry.cancel.cancel();
        info!(chat_id = %id, "chat session closed");
        Ok(())
    }

    pub fn open_chats(&self) -> usize {
        self.chats.lock().map(|chats| chats.len()).unwrap_or(0)
    }

    fn tick(&self) -> u64 {
        self.usage.fetch_add(1, Ordering::Relaxed)
    }

    fn chat_entry(&self, id: &str) -> Result<Arc<ChatEntry>, ChatRequestError> {
        self.chats
            .lock()
            .map_err(|_| ChatRequestError::Unavailable)?
            .get(id)
            .cloned()
            .ok_or(ChatRequestError::UnknownSession)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatRequestError {
    #[error("unknown chat session")]
    UnknownSession,
    #[error("reply pending")]
    ReplyPending,
    #[error("chat registry unavailable")]
    Unavailable,
    #[error(transparent)]
    Chat(#[from] ChatError),
}
