use serde::{Deserialize, Serialize};

use crate::assessment::catalog::ids;

/// Constants driving the dimension rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Readiness/sentiment ids where a high answer lowers readiness.
    pub inverse_readiness_ids: Vec<String>,
    /// Exposure ids where a high answer protects against automation.
    pub inverse_exposure_ids: Vec<String>,
    pub anxiety_id: String,
    pub excitement_id: String,
    /// Score reported for a dimension nobody answered.
    pub neutral_score: f64,
    pub default_anxiety: f64,
    /// Largest absolute weight a style scenario option may carry.
    pub max_style_weight: f64,
    pub style_boost: f64,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            inverse_readiness_ids: vec![ids::ANXIETY.to_string(), ids::PRESSURE.to_string()],
            inverse_exposure_ids: vec![
                ids::PHYSICAL.to_string(),
                ids::HUMAN.to_string(),
                ids::DECISION.to_string(),
            ],
            anxiety_id: ids::ANXIETY.to_string(),
            excitement_id: ids::EXCITEMENT.to_string(),
            neutral_score: 50.0,
            default_anxiety: 3.0,
            max_style_weight: 2.0,
            style_boost: 1.5,
        }
    }

    pub(crate) fn is_inverse_readiness(&self, id: &str) -> bool {
        self.inverse_readiness_ids.iter().any(|candidate| candidate == id)
    }

    pub(crate) fn is_inverse_exposure(&self, id: &str) -> bool {
        self.inverse_exposure_ids.iter().any(|candidate| candidate == id)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
