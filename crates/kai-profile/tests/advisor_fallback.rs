//! Advisor behaviour seen from outside the crate: generated roadmaps are
//! used when they parse, everything else degrades to the static plan, and
//! chat failures turn into an apology instead of an error.

mod common {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use kai_profile::advisor::{AdvisorError, AdvisorService, GenerationRequest, TextGenerator};
    use kai_profile::assessment::{
        AnswerMap, ArchetypeRegistry, ProfileReport, QuestionCatalog, ScoringEngine,
    };
    use kai_profile::config::AdvisorConfig;

    /// Returns the same reply (or failure) for every request.
    pub struct FixedGenerator {
        reply: Option<String>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FixedGenerator {
        pub fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<String, AdvisorError> {
            self.requests.lock().expect("mutex poisoned").push(request);
            self.reply.clone().ok_or(AdvisorError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })
        }
    }

    pub fn service(generator: Arc<FixedGenerator>) -> AdvisorService {
        AdvisorService::new(
            generator,
            Arc::new(ArchetypeRegistry::standard()),
            &AdvisorConfig::default(),
        )
    }

    pub fn report() -> ProfileReport {
        let catalog = QuestionCatalog::standard();
        let mut answers = AnswerMap::new();
        answers.set("prof_name", "Ahmet Yilmaz");
        answers.set("prof_role", "Developer");
        for id in ["style_reaction", "style_deadline", "style_ideas"] {
            answers.set(id, 2.0);
        }
        answers.set("read_freq", 60.0);
        ProfileReport::from_answers(
            &catalog,
            &ScoringEngine::standard(),
            &ArchetypeRegistry::standard(),
            &answers,
        )
    }
}

use kai_profile::advisor::{
    ChatContext, Roadmap, RoadmapContext, RoadmapSource, CONNECTION_ERROR_REPLY,
};

const GENERATED: &str = r#"```json
{
  "day30": {"focus": "Automate test data", "actions": ["Pick one fixture generator"]},
  "day60": {"focus": "Pair with an assistant", "actions": ["Review AI suggestions daily"]},
  "day90": {"focus": "Share the workflow", "actions": ["Demo it to the team"]}
}
```"#;

#[tokio::test]
async fn fenced_model_reply_becomes_the_roadmap() {
    let generator = common::FixedGenerator::replying(GENERATED);
    let service = common::service(generator.clone());
    let context = RoadmapContext::from_report(&common::report());
    let cancel = service.shutdown_token().child_token();

    let outcome = service
        .generate_roadmap(&context, &cancel)
        .await
        .expect("not cancelled");

    assert_eq!(outcome.source, RoadmapSource::Generated);
    assert_eq!(outcome.roadmap.day30.focus, "Automate test data");
    let requests = generator.requests.lock().expect("mutex poisoned");
    assert!(requests[0].json_response);
    assert!(requests[0].contents[0].text.contains("Developer"));
}

#[tokio::test]
async fn malformed_reply_falls_back_to_static_plan() {
    let service = common::service(common::FixedGenerator::replying("Here is your plan: be brave"));
    let context = RoadmapContext::from_report(&common::report());
    let cancel = service.shutdown_token().child_token();

    let outcome = service
        .generate_roadmap(&context, &cancel)
        .await
        .expect("not cancelled");

    assert_eq!(outcome.source, RoadmapSource::Fallback);
    assert_eq!(outcome.roadmap, Roadmap::fallback());
}

#[tokio::test]
async fn shutdown_cancels_roadmap_requests() {
    let service = common::service(common::FixedGenerator::failing());
    let context = RoadmapContext::from_report(&common::report());
    let cancel = service.shutdown_token().child_token();

    service.shutdown();

    assert!(service.generate_roadmap(&context, &cancel).await.is_err());
}

#[tokio::test]
async fn chat_failure_is_answered_with_an_apology() {
    let service = common::service(common::FixedGenerator::failing());
    let context = ChatContext::from_report(&common::report(), Some(&Roadmap::fallback()));

    let (session_id, greeting) = service.open_chat(&context).expect("chat opened");
    assert!(greeting.contains("Ahmet Yilmaz"));

    let reply = service
        .send_chat(&session_id, "What should I learn first?")
        .await
        .expect("reply produced");
    assert_eq!(reply, CONNECTION_ERROR_REPLY);

    service.close_chat(&session_id).expect("closed");
    assert_eq!(service.open_chats(), 0);
}
