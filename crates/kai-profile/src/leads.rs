//! Marketing lead hand-off after a completed assessment.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::assessment::profile::ProfileReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub role: String,
    /// Display name of the archetype.
    pub archetype: String,
    pub readiness_score: u8,
    pub exposure_score: u8,
    /// Rounded to one decimal.
    pub style_score: f64,
}

impl LeadSubmission {
    /// `None` unless the report carries both a name and an e-mail address.
    pub fn from_report(report: &ProfileReport) -> Option<Self> {
        let name = report.context.name.clone()?;
        let email = report.context.email.clone()?;
        Some(Self {
            name,
            email,
            role: report.context.role.clone(),
            archetype: report.archetype.name.to_string(),
            readiness_score: report.scores.readiness_score.round().clamp(0.0, 100.0) as u8,
            exposure_score: report.scores.exposure_score,
            style_score: (report.scores.style_score * 10.0).round() / 10.0,
        })
    }
}

#[async_trait]
pub trait LeadPublisher: Send + Sync {
    async fn publish(&self, lead: &LeadSubmission) -> Result<(), LeadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead webhook unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lead webhook rejected submission with status {0}")]
    Rejected(u16),
}

/// Posts leads as JSON to a configured webhook.
#[derive(Debug, Clone)]
pub struct WebhookLeadPublisher {
    http: Client,
    url: String,
}

impl WebhookLeadPublisher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LeadPublisher for WebhookLeadPublisher {
    async fn publish(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        let response = self.http.post(&self.url).json(lead).send().await?;
        if !response.status().is_success() {
            return Err(LeadError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Publishes in the background. Failures are logged, never returned.
pub fn spawn_lead_submission<P>(publisher: Arc<P>, lead: LeadSubmission) -> JoinHandle<()>
where
    P: LeadPublisher + ?Sized + 'static,
{
    tokio::spawn(async move {
        match publisher.publish(&lead).await {
            Ok(()) => debug!(archetype = %lead.archetype, "lead submitted"),
            Err(err) => warn!(error = %err, "lead submission failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        leads: Mutex<Vec<LeadSubmission>>,
    }

    #[async_trait]
    impl LeadPublisher for RecordingPublisher {
        async fn publish(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
            self.leads
                .lock()
                .expect("lead mutex poisoned")
                .push(lead.clone());
            Ok(())
        }
    }

    struct RejectingPublisher;

    #[async_trait]
    impl LeadPublisher for RejectingPublisher {
        async fn publish(&self, _lead: &LeadSubmission) -> Result<(), LeadError> {
            Err(LeadError::Rejected(500))
        }
    }

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Emma Visser".to_string(),
            email: "emma@demo.com".to_string(),
            role: "Account manager".to_string(),
            archetype: "The Creative Experimenter".to_string(),
            readiness_score: 45,
            exposure_score: 50,
            style_score: 5.0,
        }
    }

    #[tokio::test]
    async fn spawned_submission_reaches_publisher() {
        let publisher = Arc::new(RecordingPublisher::default());

        spawn_lead_submission(publisher.clone(), lead())
            .await
            .expect("task joins");

        let leads = publisher.leads.lock().expect("lead mutex poisoned");
        assert_eq!(leads.as_slice(), &[lead()]);
    }

    #[tokio::test]
    async fn failed_submission_is_swallowed() {
        spawn_lead_submission(Arc::new(RejectingPublisher), lead())
            .await
            .expect("task completes without panicking");
    }

    #[test]
    fn payload_uses_camel_case_keys() {
        let json = serde_json::to_value(lead()).expect("serializes");
        assert_eq!(json["readinessScore"], 45);
        assert_eq!(json["styleScore"], 5.0);
    }
}
