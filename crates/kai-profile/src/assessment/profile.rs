use serde::{Deserialize, Serialize};

use super::answers::AnswerMap;
use super::archetypes::{Archetype, ArchetypeRegistry};
use super::catalog::{ids, QuestionCatalog};
use super::scoring::{ScoreResult, ScoringEngine};

/// Who took the assessment, as far as the profile questions tell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileContext {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub org_code: Option<String>,
    pub role: String,
    pub department: String,
    pub industry: String,
    pub experience: String,
    pub org_size: String,
}

impl ProfileContext {
    pub fn from_answers(answers: &AnswerMap) -> Self {
        let text_or = |id: &str, default: &str| {
            answers
                .text(id)
                .map_or_else(|| default.to_string(), str::to_string)
        };

        Self {
            name: answers.text(ids::NAME).map(str::to_string),
            email: answers.text(ids::EMAIL).map(str::to_string),
            org_code: answers.text(ids::ORG_CODE).map(str::to_uppercase),
            role: text_or(ids::ROLE, "Professional"),
            department: text_or(ids::DEPARTMENT, "General"),
            industry: text_or(ids::INDUSTRY, "Unknown"),
            experience: text_or(ids::EXPERIENCE, "Medior"),
            org_size: text_or(ids::ORG_SIZE, "SME"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("You")
    }

    /// Name and e-mail are both known, so the result can be stored.
    pub fn is_identified(&self) -> bool {
        self.name.is_some() && self.email.is_some()
    }
}

/// Position on the style (x) versus readiness (y) matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub axis: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

/// Everything the results page shows for one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub context: ProfileContext,
    pub scores: ScoreResult,
    pub archetype: Archetype,
    pub style_label: &'static str,
    pub scatter: ScatterPoint,
    pub radar: Vec<RadarAxis>,
}

impl ProfileReport {
    pub fn build(context: ProfileContext, scores: ScoreResult, registry: &ArchetypeRegistry) -> Self {
        let axis = |axis: &'static str, value: f64| RadarAxis {
            axis,
            value,
            full_mark: 100.0,
        };
        let radar = vec![
            axis("Innovation strength", f64::from(scores.innovation_score)),
            axis("Process discipline", f64::from(scores.process_score)),
            axis("AI skills", scores.readiness_score),
            axis("Automation risk", f64::from(scores.exposure_score)),
            axis("Openness to change", scores.sentiment_score),
        ];

        Self {
            context,
            archetype: registry.get(scores.archetype).clone(),
            style_label: scores.style_label(),
            scatter: ScatterPoint {
                x: scores.style_score,
                y: scores.readiness_score,
            },
            radar,
            scores,
        }
    }

    /// Scores `answers` and assembles the report in one go.
    pub fn from_answers(
        catalog: &QuestionCatalog,
        engine: &ScoringEngine,
        registry: &ArchetypeRegistry,
        answers: &AnswerMap,
    ) -> Self {
        let scores = engine.score(catalog, answers);
        Self::build(ProfileContext::from_answers(answers), scores, registry)
    }
}
