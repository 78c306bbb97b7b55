use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw value captured for a question: a number for scale/slider/scenario/select
/// widgets, free text for profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Numeric reading of the answer. Numeric strings are accepted; anything
    /// else (including non-finite numbers) reads as unanswered.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            AnswerValue::Number(value) => *value,
            AnswerValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text.as_str()),
            AnswerValue::Number(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Number(value) => !value.is_finite(),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Answers collected during one assessment session, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn number(&self, question_id: &str) -> Option<f64> {
        self.get(question_id).and_then(AnswerValue::as_number)
    }

    /// Trimmed, non-empty text answer.
    pub fn text(&self, question_id: &str) -> Option<&str> {
        self.get(question_id)
            .and_then(AnswerValue::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerMap
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_read_as_numbers() {
        let answers: AnswerMap = [("read_learning", "4"), ("prof_name", "Ada")]
            .into_iter()
            .collect();

        assert_eq!(answers.number("read_learning"), Some(4.0));
        assert_eq!(answers.number("prof_name"), None);
        assert_eq!(answers.text("prof_name"), Some("Ada"));
    }

    #[test]
    fn non_finite_numbers_read_as_unanswered() {
        let mut answers = AnswerMap::new();
        answers.set("exp_data", f64::NAN);

        assert!(answers.contains("exp_data"));
        assert_eq!(answers.number("exp_data"), None);
        assert!(answers.get("exp_data").expect("stored").is_blank());
    }

    #[test]
    fn deserializes_mixed_json_values() {
        let answers: AnswerMap =
            serde_json::from_str(r#"{"sent_anxiety": 4, "prof_email": "a@b.nl"}"#)
                .expect("valid answers json");

        assert_eq!(answers.number("sent_anxiety"), Some(4.0));
        assert_eq!(answers.text("prof_email"), Some("a@b.nl"));
    }
}
