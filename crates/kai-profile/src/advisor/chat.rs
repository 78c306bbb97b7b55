use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::client::{ChatTurn, GenerationRequest, TextGenerator};
use super::roadmap::Roadmap;
use crate::assessment::archetypes::{Archetype, ArchetypeKey};
use crate::assessment::profile::ProfileReport;

pub const CONNECTION_ERROR_REPLY: &str = "Sorry, something went wrong with the connection.";
pub const EMPTY_REPLY: &str = "Sorry, I could not generate an answer.";
/// Turns kept in a session's history; older exchanges are dropped in pairs.
pub const MAX_CHAT_TURNS: usize = 40;

/// Everything the assistant knows about the person it talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub name: String,
    pub role: String,
    pub department: String,
    pub industry: String,
    pub org_size: String,
    pub archetype: ArchetypeKey,
    pub readiness_score: f64,
    pub style_score: f64,
    pub exposure_score: u8,
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
}

impl ChatContext {
    pub fn from_report(report: &ProfileReport, roadmap: Option<&Roadmap>) -> Self {
        Self {
            name: report.context.display_name().to_string(),
            role: report.context.role.clone(),
            department: report.context.department.clone(),
            industry: report.context.industry.clone(),
            org_size: report.context.org_size.clone(),
            archetype: report.scores.archetype,
            readiness_score: report.scores.readiness_score,
            style_score: report.scores.style_score,
            exposure_score: report.scores.exposure_score,
            roadmap: roadmap.cloned(),
        }
    }
}

pub fn greeting(context: &ChatContext, archetype: &Archetype) -> String {
    format!(
        "Hello {}! I'm your AI assistant. I see you have a {} profile. Any questions about your results or plan?",
        context.name, archetype.name
    )
}

pub fn system_instruction(context: &ChatContext, archetype: &Archetype) -> String {
    let roadmap = context
        .roadmap
        .as_ref()
        .and_then(|roadmap| serde_json::to_string_pretty(roadmap).ok())
        .unwrap_or_else(|| "No roadmap generated yet.".to_string());

    let mut instruction = String::new();
    instruction.push_str("You are a helpful AI assistant for the KAI profile platform.\n");
    instruction
        .push_str("You are chatting with a user who just completed their AI readiness assessment.\n\n");
    instruction.push_str("Here is the user's profile and results:\n");
    let _ = writeln!(instruction, "- Name: {}", context.name);
    let _ = writeln!(instruction, "- Role: {}", context.role);
    let _ = writeln!(instruction, "- Department: {}", context.department);
    let _ = writeln!(instruction, "- Industry: {}", context.industry);
    let _ = writeln!(instruction, "- Org size: {}", context.org_size);
    let _ = writeln!(
        instruction,
        "- Archetype: {} ({})",
        archetype.name, archetype.description
    );
    let _ = writeln!(
        instruction,
        "- AI readiness score: {}/100",
        context.readiness_score.round()
    );
    let _ = writeln!(
        instruction,
        "- Cognitive style score: {:.1} (-10 Adaptor to +10 Innovator)",
        context.style_score
    );
    let _ = writeln!(instruction, "- Exposure score: {}/100", context.exposure_score);
    let _ = writeln!(instruction, "- Generated roadmap:\n{roadmap}\n");
    instruction.push_str(
        "Help the user understand their results, explain the KAI model concepts (Adaptor versus Innovator) \
         and answer questions about their roadmap.\n",
    );
    instruction.push_str("Be encouraging, professional and concise.\n");
    instruction.push_str("Do not invent scores that are not listed above.\n");
    instruction.push_str("Answer in the language the user writes in.\n");
    instruction
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("chat request cancelled")]
    Cancelled,
}

/// One conversation with the assistant. `send` needs exclusive access, so
/// two replies can never interleave in the history.
pub struct ChatSession {
    generator: Arc<dyn TextGenerator>,
    model: String,
    system_instruction: String,
    greeting: String,
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        context: &ChatContext,
        archetype: &Archetype,
    ) -> Self {
        Self {
            generator,
            model: model.into(),
            system_instruction: system_instruction(context, archetype),
            greeting: greeting(context, archetype),
            turns: Vec::new(),
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Exchanged messages, excluding the greeting.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Sends `text` and returns the assistant reply. Generation failures
    /// become an apology reply; cancellation leaves the history untouched.
    pub async fn send(
        &mut self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if cancel.is_cancelled() {
            return Err(ChatError::Cancelled);
        }

        self.turns.push(ChatTurn::user(text));
        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            contents: self.turns.clone(),
            json_response: false,
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.generator.generate(request) => Some(result),
        };

        let reply = match result {
            None => {
                self.turns.pop();
                return Err(ChatError::Cancelled);
            }
            Some(Ok(reply)) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
            Some(Ok(reply)) => reply.trim().to_string(),
            Some(Err(err)) => {
                warn!(error = %err, "chat reply failed");
                CONNECTION_ERROR_REPLY.to_string()
            }
        };

        self.turns.push(ChatTurn::model(reply.clone()));
        if self.turns.len() > MAX_CHAT_TURNS {
            let excess = self.turns.len() - MAX_CHAT_TURNS;
            self.turns.drain(..excess);
        }
        Ok(reply)
    }
}
