mod standard;

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::answers::AnswerValue;

pub use standard::QUICK_SCAN_IDS;

/// Question ids with special meaning for the flow controller and reports.
pub mod ids {
    pub const NAME: &str = "prof_name";
    pub const EMAIL: &str = "prof_email";
    pub const ORG_CODE: &str = "prof_org_code";
    pub const ROLE: &str = "prof_role";
    pub const INDUSTRY: &str = "prof_industry";
    pub const DEPARTMENT: &str = "prof_dept";
    pub const EXPERIENCE: &str = "prof_exp";
    pub const ORG_SIZE: &str = "prof_org_size";
    pub const ANXIETY: &str = "sent_anxiety";
    pub const PRESSURE: &str = "sent_pressure";
    pub const EXCITEMENT: &str = "sent_excitement";
    pub const PHYSICAL: &str = "exp_physical";
    pub const HUMAN: &str = "exp_human";
    pub const DECISION: &str = "exp_decision";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Profile,
    Exposure,
    Style,
    Readiness,
    Sentiment,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionCategory::Profile => "Profile & Context",
            QuestionCategory::Exposure => "Task & Role Analysis",
            QuestionCategory::Style => "Cognitive Style (KAI)",
            QuestionCategory::Readiness => "Digital Skills",
            QuestionCategory::Sentiment => "Outlook",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// 1 to 5.
    Scale,
    /// 0 to 100 in steps of 10.
    Slider,
    /// Two or more options carrying a signed weight.
    Scenario,
    Select,
    Text,
}

impl QuestionType {
    pub const fn requires_options(self) -> bool {
        matches!(self, QuestionType::Select | QuestionType::Scenario)
    }

    /// Implicit numeric range for widgets without options.
    pub const fn implicit_range(self) -> Option<(f64, f64)> {
        match self {
            QuestionType::Scale => Some((1.0, 5.0)),
            QuestionType::Slider => Some((0.0, 100.0)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: QuestionCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

/// Which slice of the catalog a session walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    #[default]
    Full,
    Quick,
}

/// Ordered, validated, immutable list of questions.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
            validate_question(question)?;
        }
        Ok(Self { questions })
    }

    /// The built-in catalog shipped with the assessment.
    pub fn standard() -> Self {
        Self {
            questions: standard::standard_questions(),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn in_category(&self, category: QuestionCategory) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions a session walks through, in catalog order, capped at `limit`.
    pub fn active_questions(&self, mode: AssessmentMode, limit: Option<usize>) -> Vec<&Question> {
        let selected = self.questions.iter().filter(|question| match mode {
            AssessmentMode::Full => true,
            AssessmentMode::Quick => QUICK_SCAN_IDS.contains(&question.id.as_str()),
        });

        match limit {
            Some(limit) => selected.take(limit).collect(),
            None => selected.collect(),
        }
    }
}

fn validate_question(question: &Question) -> Result<(), CatalogError> {
    let has_options = !question.options.is_empty();
    if question.question_type.requires_options() && !has_options {
        return Err(CatalogError::MissingOptions {
            id: question.id.clone(),
        });
    }
    if !question.question_type.requires_options() && has_options {
        return Err(CatalogError::UnexpectedOptions {
            id: question.id.clone(),
        });
    }
    if question.question_type == QuestionType::Scenario
        && question
            .options
            .iter()
            .any(|option| !matches!(option.value, AnswerValue::Number(value) if value.is_finite()))
    {
        return Err(CatalogError::NonNumericScenarioOption {
            id: question.id.clone(),
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate question id '{0}'")]
    DuplicateId(String),
    #[error("question '{id}' requires options")]
    MissingOptions { id: String },
    #[error("question '{id}' must not declare options")]
    UnexpectedOptions { id: String },
    #[error("scenario question '{id}' has a non-numeric option weight")]
    NonNumericScenarioOption { id: String },
    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_passes_validation() {
        let standard = QuestionCatalog::standard();
        let rebuilt = QuestionCatalog::new(standard.questions().to_vec())
            .expect("standard catalog is valid");
        assert_eq!(rebuilt.len(), standard.len());
    }

    #[test]
    fn style_questions_are_weighted_scenarios() {
        let catalog = QuestionCatalog::standard();
        let style: Vec<_> = catalog.in_category(QuestionCategory::Style).collect();

        assert_eq!(style.len(), 6);
        for question in style {
            assert_eq!(question.question_type, QuestionType::Scenario);
            for option in &question.options {
                let weight = option.value.as_number().expect("numeric weight");
                assert!([-2.0, -1.0, 1.0, 2.0].contains(&weight), "{}", question.id);
            }
        }
    }

    #[test]
    fn quick_scan_keeps_catalog_order_and_limit() {
        let catalog = QuestionCatalog::standard();

        let quick = catalog.active_questions(AssessmentMode::Quick, None);
        let quick_ids: Vec<_> = quick.iter().map(|question| question.id.as_str()).collect();
        assert_eq!(quick_ids.len(), QUICK_SCAN_IDS.len());
        assert_eq!(quick_ids.first(), Some(&"prof_name"));

        let limited = catalog.active_questions(AssessmentMode::Quick, Some(3));
        assert_eq!(limited.len(), 3);

        let oversized = catalog.active_questions(AssessmentMode::Full, Some(500));
        assert_eq!(oversized.len(), catalog.len());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let question = Question {
            id: "read_learning".to_string(),
            text: "How quickly do you learn new systems?".to_string(),
            sub_text: None,
            question_type: QuestionType::Scale,
            category: QuestionCategory::Readiness,
            options: Vec::new(),
        };

        let err = QuestionCatalog::new(vec![question.clone(), question])
            .expect_err("duplicate ids rejected");
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "read_learning"));
    }

    #[test]
    fn rejects_option_invariant_violations() {
        let json = r#"[{"id": "prof_exp", "text": "Experience?", "type": "SELECT", "category": "profile"}]"#;
        let err = QuestionCatalog::from_json_reader(json.as_bytes()).expect_err("missing options");
        assert!(matches!(err, CatalogError::MissingOptions { .. }));

        let json = r#"[{"id": "exp_text", "text": "Templates?", "type": "SCALE", "category": "exposure",
            "options": [{"label": "x", "value": 1}]}]"#;
        let err = QuestionCatalog::from_json_reader(json.as_bytes()).expect_err("unexpected options");
        assert!(matches!(err, CatalogError::UnexpectedOptions { .. }));

        let json = r#"[{"id": "style_x", "text": "Pick", "type": "SCENARIO", "category": "style",
            "options": [{"label": "a", "value": "left"}]}]"#;
        let err = QuestionCatalog::from_json_reader(json.as_bytes()).expect_err("text weight");
        assert!(matches!(err, CatalogError::NonNumericScenarioOption { .. }));
    }
}
