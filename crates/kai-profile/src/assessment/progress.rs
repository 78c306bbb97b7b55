use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerMap;
use crate::directory::RepositoryError;

/// Saved position in an unfinished assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub step: usize,
    pub answers: AnswerMap,
    pub saved_at: DateTime<Utc>,
}

/// Key-value store for unfinished sessions.
pub trait ProgressStore: Send + Sync {
    fn load_progress(&self, key: &str) -> Result<Option<ProgressSnapshot>, RepositoryError>;
    fn save_progress(&self, key: &str, snapshot: ProgressSnapshot) -> Result<(), RepositoryError>;
    fn clear_progress(&self, key: &str) -> Result<(), RepositoryError>;
}
