//! AI guidance on top of a scored profile: a 30/60/90-day roadmap and a
//! conversational assistant. Generation runs behind [`TextGenerator`] and
//! degrades to static content when the model is unreachable.

pub mod chat;
pub mod client;
pub mod roadmap;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use chat::{ChatContext, ChatError, ChatSession, CONNECTION_ERROR_REPLY, EMPTY_REPLY};
pub use client::{AdvisorError, ChatRole, ChatTurn, GeminiClient, GenerationRequest, TextGenerator};
pub use roadmap::{Roadmap, RoadmapContext, RoadmapOutcome, RoadmapPhase, RoadmapSource};
pub use router::advisor_router;
pub use service::{AdvisorService, Cancelled, ChatRequestError};
