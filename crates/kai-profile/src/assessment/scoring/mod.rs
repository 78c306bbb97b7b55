mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::{classify, ClassificationInput, StylePole};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::AnswerMap;
use super::archetypes::ArchetypeKey;
use super::catalog::QuestionCatalog;

/// Stateless scorer applying a [`ScoringConfig`] to a set of answers.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(ScoringConfig::standard())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Total over any answer map: missing, textual or non-finite answers
    /// are skipped, never rejected.
    pub fn score(&self, catalog: &QuestionCatalog, answers: &AnswerMap) -> ScoreResult {
        let mut contributions = Vec::new();

        let style = rules::score_style(catalog, answers, &self.config, &mut contributions);
        let readiness_score =
            rules::score_readiness(catalog, answers, &self.config, &mut contributions);
        let exposure_score =
            rules::score_exposure(catalog, answers, &self.config, &mut contributions);
        let sentiment_score = rules::score_sentiment(answers, &self.config, &mut contributions);
        let anxiety_raw = rules::anxiety_raw(answers, &self.config);

        let archetype = classify(&ClassificationInput {
            style_score: style.score,
            readiness_score,
            anxiety_raw,
        });

        debug!(
            %archetype,
            style = style.score,
            readiness = readiness_score,
            exposure = exposure_score,
            answered = answers.len(),
            "scored assessment"
        );

        ScoreResult {
            style_score: style.score,
            readiness_score,
            exposure_score,
            sentiment_score,
            process_score: style.process_score,
            innovation_score: style.innovation_score,
            anxiety_raw,
            archetype,
            contributions,
        }
    }
}

/// Scores `answers` with the standard configuration.
pub fn compute_scores(answers: &AnswerMap, catalog: &QuestionCatalog) -> ScoreResult {
    ScoringEngine::standard().score(catalog, answers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Style,
    Readiness,
    Exposure,
    Sentiment,
}

/// Points one answered question added to a dimension, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub question_id: String,
    pub dimension: ScoreDimension,
    pub points: f64,
    pub max_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// -10 (adaptor) to +10 (innovator).
    pub style_score: f64,
    pub readiness_score: f64,
    pub exposure_score: u8,
    pub sentiment_score: f64,
    pub process_score: u8,
    pub innovation_score: u8,
    pub anxiety_raw: f64,
    pub archetype: ArchetypeKey,
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreResult {
    pub fn style_label(&self) -> &'static str {
        if self.style_score > 0.0 {
            "Innovative"
        } else {
            "Adaptive"
        }
    }

    pub fn classification_input(&self) -> ClassificationInput {
        ClassificationInput {
            style_score: self.style_score,
            readiness_score: self.readiness_score,
            anxiety_raw: self.anxiety_raw,
        }
    }
}
