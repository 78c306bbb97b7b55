//! The KAI assessment: question catalog, scoring engine, archetype
//! classification and the step-by-step flow that collects answers.

pub mod answers;
pub mod archetypes;
pub mod catalog;
pub mod flow;
pub mod profile;
pub mod progress;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use answers::{AnswerMap, AnswerValue};
pub use archetypes::{Archetype, ArchetypeKey, ArchetypeRegistry};
pub use catalog::{
    AssessmentMode, CatalogError, Question, QuestionCatalog, QuestionCategory, QuestionOption,
    QuestionType,
};
pub use flow::{AssessmentPlan, AssessmentSession, FlowError, SessionStatus, StepOutcome};
pub use profile::{ProfileContext, ProfileReport, RadarAxis, ScatterPoint};
pub use progress::{ProgressSnapshot, ProgressStore};
pub use router::assessment_router;
pub use scoring::{
    classify, compute_scores, ClassificationInput, ScoreContribution, ScoreDimension, ScoreResult,
    ScoringConfig, ScoringEngine, StylePole,
};
pub use service::{
    AdvanceRequest, AdvanceResponse, AssessmentService, AssessmentServiceError, CompleteRequest,
    CompletionOutcome,
};
