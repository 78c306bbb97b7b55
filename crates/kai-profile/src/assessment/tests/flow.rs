use super::common::*;
use chrono::{TimeZone, Utc};

use crate::assessment::answers::{AnswerMap, AnswerValue};
use crate::assessment::catalog::{ids, AssessmentMode, QUICK_SCAN_IDS};
use crate::assessment::flow::{AssessmentPlan, AssessmentSession, FlowError, SessionStatus, StepOutcome};
use crate::assessment::progress::ProgressStore;
use crate::assessment::service::{AssessmentServiceError, CompleteRequest};
use crate::directory::tests::common::{MemoryStore, UnavailableStore};
use crate::directory::{DirectoryStore, RepositoryError};

fn quick() -> AssessmentPlan {
    AssessmentPlan {
        mode: AssessmentMode::Quick,
        limit: None,
    }
}

#[test]
fn quick_scan_walks_its_subset_in_order() {
    let catalog = catalog();
    let session = AssessmentSession::new(&catalog, quick());

    assert_eq!(session.total(), QUICK_SCAN_IDS.len());
    assert_eq!(
        session.current_question().map(|question| question.id.as_str()),
        Some(ids::NAME)
    );
    assert_eq!(session.progress_percent(), 0);
}

#[test]
fn limit_caps_the_question_list() {
    let catalog = catalog();
    let session = AssessmentSession::new(
        &catalog,
        AssessmentPlan {
            mode: AssessmentMode::Full,
            limit: Some(3),
        },
    );

    assert_eq!(session.total(), 3);
}

#[test]
fn unanswered_question_blocks_progress() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let mut session = AssessmentSession::new(&catalog, quick());

    let err = session.advance(&store).expect_err("answer required");

    assert!(matches!(err, FlowError::AnswerRequired { ref question_id } if question_id == ids::NAME));
    assert_eq!(session.step(), 0);
}

#[test]
fn malformed_email_is_rejected() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let mut session = AssessmentSession::new(&catalog, quick());
    session.answer("Sophie de Vries").expect("name");
    session.advance(&store).expect("name accepted");

    session.answer("sophie-at-demo").expect("email");
    let err = session.advance(&store).expect_err("invalid email");

    assert!(matches!(err, FlowError::InvalidEmail));
    assert_eq!(session.step(), 1);

    session.answer("sophie@demo.com").expect("email");
    assert_eq!(
        session.advance(&store).expect("email accepted"),
        StepOutcome::Moved { step: 2 }
    );
}

#[test]
fn organization_code_must_exist_when_given() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let plan = AssessmentPlan::default();
    let org_step = catalog
        .active_questions(plan.mode, plan.limit)
        .iter()
        .position(|question| question.id == ids::ORG_CODE)
        .expect("org code question");

    let mut session = AssessmentSession::with_state(&catalog, plan, org_step, 0, Default::default());
    session.answer(" ghost ").expect("answered");
    let err = session.advance(&store).expect_err("unknown code");
    assert!(matches!(err, FlowError::UnknownOrganization { ref code } if code == "GHOST"));

    session.answer("   ").expect("cleared");
    assert_eq!(
        session.advance(&store).expect("blank code is optional"),
        StepOutcome::Moved { step: org_step + 1 }
    );
}

#[test]
fn known_organization_code_is_normalized() {
    let fixture = fixture();
    let catalog = catalog();
    let plan = AssessmentPlan::default();
    let org_step = catalog
        .active_questions(plan.mode, plan.limit)
        .iter()
        .position(|question| question.id == ids::ORG_CODE)
        .expect("org code question");
    let mut session = AssessmentSession::with_state(&catalog, plan, org_step, 0, Default::default());

    session.answer("demo2025").expect("answered");
    session.advance(fixture.store.as_ref()).expect("known code");

    assert_eq!(session.answers().text(ids::ORG_CODE), Some("DEMO2025"));
}

#[test]
fn directory_outage_surfaces_as_store_error() {
    let catalog = catalog();
    let plan = AssessmentPlan::default();
    let org_step = catalog
        .active_questions(plan.mode, plan.limit)
        .iter()
        .position(|question| question.id == ids::ORG_CODE)
        .expect("org code question");
    let mut session = AssessmentSession::with_state(&catalog, plan, org_step, 0, Default::default());
    session.answer("DEMO2025").expect("answered");

    let err = session.advance(&UnavailableStore).expect_err("offline");

    assert!(matches!(err, FlowError::Store(RepositoryError::Unavailable(_))));
}

#[test]
fn answering_every_question_completes_the_session() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let mut session = AssessmentSession::new(&catalog, quick());

    let mut outcome = StepOutcome::Moved { step: 0 };
    while let Some(question) = session.current_question() {
        session.answer(sample_answer(question)).expect("answered");
        outcome = session.advance(&store).expect("valid answer");
    }

    assert_eq!(outcome, StepOutcome::Completed);
    assert!(session.is_complete());
    assert_eq!(session.status(), SessionStatus::Complete);
    assert_eq!(session.progress_percent(), 100);
    assert!(matches!(
        session.answer(1.0),
        Err(FlowError::SessionComplete)
    ));
    assert_eq!(session.into_answers().len(), QUICK_SCAN_IDS.len());
}

#[test]
fn back_never_passes_the_resumed_step() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let saved_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).single().expect("valid time");
    let mut answers = crate::assessment::answers::AnswerMap::new();
    answers.set(ids::NAME, "Sophie de Vries");
    answers.set(ids::EMAIL, "sophie@demo.com");
    let snapshot = crate::assessment::progress::ProgressSnapshot {
        step: 2,
        answers,
        saved_at,
    };

    let mut session = AssessmentSession::resume(&catalog, quick(), snapshot);
    assert_eq!(session.initial_step(), 2);
    assert!(!session.back());

    let question = session.current_question().expect("role question");
    session.answer(sample_answer(question)).expect("answered");
    session.advance(&store).expect("valid answer");
    assert!(session.back());
    assert_eq!(session.step(), 2);
    assert!(!session.back());
}

#[test]
fn progress_round_trips_through_the_store() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let saved_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).single().expect("valid time");
    let mut session = AssessmentSession::new(&catalog, quick());
    session.answer("Sophie de Vries").expect("name");
    session.advance(&store).expect("name accepted");

    session
        .save_progress(&store, "sophie", saved_at)
        .expect("saved");
    let snapshot = store
        .load_progress("sophie")
        .expect("readable")
        .expect("snapshot present");
    assert_eq!(snapshot.step, 1);
    assert_eq!(snapshot.saved_at, saved_at);

    let resumed = AssessmentSession::resume(&catalog, quick(), snapshot);
    assert_eq!(resumed.answers().text(ids::NAME), Some("Sophie de Vries"));

    assert!(!resumed.is_complete());
}

#[test]
fn public_code_needs_no_organization() {
    let catalog = catalog();
    let store = MemoryStore::default();
    let plan = AssessmentPlan::default();
    let org_step = catalog
        .active_questions(plan.mode, plan.limit)
        .iter()
        .position(|question| question.id == ids::ORG_CODE)
        .expect("org code question");
    let mut session = AssessmentSession::with_state(&catalog, plan, org_step, 0, Default::default());

    session.answer("public").expect("answered");

    assert_eq!(
        session.advance(&store).expect("public code accepted"),
        StepOutcome::Moved { step: org_step + 1 }
    );
}

#[test]
fn completion_rejects_unknown_organization_code() {
    let fixture = fixture();
    let answers: AnswerMap = [
        (ids::NAME, AnswerValue::from("Eve Jansen")),
        (ids::EMAIL, AnswerValue::from("eve@example.nl")),
        (ids::ORG_CODE, AnswerValue::from("ghost")),
    ]
    .into_iter()
    .collect();

    let err = fixture
        .service
        .complete(CompleteRequest {
            answers,
            progress_key: None,
        })
        .expect_err("unknown organization");

    assert!(matches!(
        err,
        AssessmentServiceError::Flow(FlowError::UnknownOrganization { ref code }) if code == "GHOST"
    ));
    assert!(fixture.store.employees_in("GHOST").expect("listing").is_empty());
    assert!(fixture.publisher.leads.lock().expect("lead mutex poisoned").is_empty());
}

#[tokio::test]
async fn completion_files_public_and_known_codes() {
    let fixture = fixture();
    let answers_for = |code: &str| -> AnswerMap {
        [
            (ids::NAME, AnswerValue::from("Eve Jansen")),
            (ids::EMAIL, AnswerValue::from("eve@example.nl")),
            (ids::ORG_CODE, AnswerValue::from(code)),
        ]
        .into_iter()
        .collect()
    };

    for code in ["public", "demo2025"] {
        let outcome = fixture
            .service
            .complete(CompleteRequest {
                answers: answers_for(code),
                progress_key: None,
            })
            .expect("completed");
        assert_eq!(
            outcome.employee.expect("recorded").org_code,
            code.to_uppercase()
        );
    }
}
