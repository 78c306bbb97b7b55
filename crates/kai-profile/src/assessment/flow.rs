use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::{AnswerMap, AnswerValue};
use super::catalog::{ids, AssessmentMode, Question, QuestionCatalog};
use super::progress::{ProgressSnapshot, ProgressStore};
use crate::directory::{DirectoryStore, RepositoryError, PUBLIC_ORG_CODE};

/// Which questions a session walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentPlan {
    #[serde(default)]
    pub mode: AssessmentMode,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { step: usize },
    Completed,
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("question '{question_id}' needs an answer")]
    AnswerRequired { question_id: String },
    #[error("enter a valid e-mail address")]
    InvalidEmail,
    #[error("organization code '{code}' is unknown")]
    UnknownOrganization { code: String },
    #[error("the assessment is already complete")]
    SessionComplete,
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Walks a user through the active questions, one step at a time.
#[derive(Debug, Clone)]
pub struct AssessmentSession<'a> {
    questions: Vec<&'a Question>,
    step: usize,
    initial_step: usize,
    answers: AnswerMap,
}

impl<'a> AssessmentSession<'a> {
    pub fn new(catalog: &'a QuestionCatalog, plan: AssessmentPlan) -> Self {
        Self::with_state(catalog, plan, 0, 0, AnswerMap::new())
    }

    /// Continues from a saved snapshot; `back` stops at the saved step.
    pub fn resume(
        catalog: &'a QuestionCatalog,
        plan: AssessmentPlan,
        snapshot: ProgressSnapshot,
    ) -> Self {
        Self::with_state(
            catalog,
            plan,
            snapshot.step,
            snapshot.step,
            snapshot.answers,
        )
    }

    /// Rebuilds a session from client-held state.
    pub fn with_state(
        catalog: &'a QuestionCatalog,
        plan: AssessmentPlan,
        step: usize,
        initial_step: usize,
        answers: AnswerMap,
    ) -> Self {
        Self {
            questions: catalog.active_questions(plan.mode, plan.limit),
            step,
            initial_step: initial_step.min(step),
            answers,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn initial_step(&self) -> usize {
        self.initial_step
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerMap {
        self.answers
    }

    /// A step past the last question, or an empty plan, counts as complete.
    pub fn is_complete(&self) -> bool {
        self.step >= self.questions.len()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_complete() {
            SessionStatus::Complete
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.questions.get(self.step).copied()
    }

    pub fn progress_percent(&self) -> u8 {
        if self.is_complete() {
            return 100;
        }
        (self.step as f64 / self.questions.len() as f64 * 100.0).round() as u8
    }

    /// Records an answer for the current question.
    pub fn answer(&mut self, value: impl Into<AnswerValue>) -> Result<(), FlowError> {
        let question = self.current_question().ok_or(FlowError::SessionComplete)?;
        let value = normalize_answer(&question.id, value.into());
        self.answers.set(question.id.clone(), value);
        Ok(())
    }

    /// Validates the current answer and moves forward. Advancing from the
    /// last question completes the session.
    pub fn advance<D>(&mut self, directory: &D) -> Result<StepOutcome, FlowError>
    where
        D: DirectoryStore + ?Sized,
    {
        let Some(question) = self.current_question() else {
            return Ok(StepOutcome::Completed);
        };

        if let Some(value) = self.answers.get(&question.id).cloned() {
            self.answers
                .set(question.id.clone(), normalize_answer(&question.id, value));
        }
        validate_answer(question, &self.answers, directory)?;

        self.step += 1;
        if self.is_complete() {
            Ok(StepOutcome::Completed)
        } else {
            Ok(StepOutcome::Moved { step: self.step })
        }
    }

    /// Steps back unless already at the initial step.
    pub fn back(&mut self) -> bool {
        let previous = self
            .step
            .min(self.questions.len())
            .saturating_sub(1)
            .max(self.initial_step);
        if previous >= self.step {
            return false;
        }
        self.step = previous;
        true
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> ProgressSnapshot {
        ProgressSnapshot {
            step: self.step,
            answers: self.answers.clone(),
            saved_at: now,
        }
    }

    pub fn save_progress<P>(&self, store: &P, key: &str, now: DateTime<Utc>) -> Result<(), FlowError>
    where
        P: ProgressStore + ?Sized,
    {
        store.save_progress(key, self.snapshot(now))?;
        Ok(())
    }
}

fn normalize_answer(question_id: &str, value: AnswerValue) -> AnswerValue {
    match value {
        AnswerValue::Text(code) if question_id == ids::ORG_CODE => {
            AnswerValue::Text(code.trim().to_uppercase())
        }
        other => other,
    }
}

fn validate_answer<D>(question: &Question, answers: &AnswerMap, directory: &D) -> Result<(), FlowError>
where
    D: DirectoryStore + ?Sized,
{
    let value = answers.get(&question.id).filter(|value| !value.is_blank());

    if question.id == ids::ORG_CODE {
        let Some(code) = value.and_then(AnswerValue::as_text) else {
            return Ok(());
        };
        if code == PUBLIC_ORG_CODE {
            return Ok(());
        }
        return match directory.organization_by_code(code)? {
            Some(_) => Ok(()),
            None => Err(FlowError::UnknownOrganization {
                code: code.to_string(),
            }),
        };
    }

    let Some(value) = value else {
        return Err(FlowError::AnswerRequired {
            question_id: question.id.clone(),
        });
    };

    if question.id == ids::EMAIL {
        let email = value.as_text().unwrap_or_default();
        if !(email.contains('@') && email.contains('.')) {
            return Err(FlowError::InvalidEmail);
        }
    }

    Ok(())
}
