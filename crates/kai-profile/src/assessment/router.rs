use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::answers::AnswerMap;
use super::flow::{AssessmentPlan, FlowError};
use super::progress::ProgressStore;
use super::service::{AdvanceRequest, AssessmentService, AssessmentServiceError, CompleteRequest};
use crate::directory::router::directory_error_response;
use crate::directory::{DirectoryStore, RepositoryError};
use crate::leads::LeadPublisher;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    answers: AnswerMap,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressRequest {
    step: usize,
    #[serde(default)]
    answers: AnswerMap,
}

/// Router for taking the assessment: questions, step validation, scoring
/// and saved progress.
pub fn assessment_router<S, L>(service: Arc<AssessmentService<S, L>>) -> Router
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(questions_handler::<S, L>))
        .route("/api/v1/assessment/score", post(score_handler::<S, L>))
        .route("/api/v1/assessment/advance", post(advance_handler::<S, L>))
        .route("/api/v1/assessment/complete", post(complete_handler::<S, L>))
        .route(
            "/api/v1/assessment/progress/:key",
            get(load_progress_handler::<S, L>)
                .put(save_progress_handler::<S, L>)
                .delete(clear_progress_handler::<S, L>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Query(plan): Query<AssessmentPlan>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    (StatusCode::OK, Json(service.questions(plan))).into_response()
}

pub(crate) async fn score_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    (StatusCode::OK, Json(service.report(&request.answers))).into_response()
}

pub(crate) async fn advance_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Json(request): Json<AdvanceRequest>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.advance(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => flow_error_response(err),
    }
}

pub(crate) async fn complete_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Json(request): Json<CompleteRequest>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.complete(request) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(AssessmentServiceError::Flow(err)) => flow_error_response(err),
        Err(AssessmentServiceError::Directory(err)) => directory_error_response(err),
        Err(AssessmentServiceError::Store(err)) => store_error_response(err),
    }
}

pub(crate) async fn load_progress_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Path(key): Path<String>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.load_progress(&key) {
        Ok(Some(snapshot)) => (StatusCode::OK, Json(snapshot)).into_response(),
        Ok(None) => store_error_response(RepositoryError::NotFound),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn save_progress_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Path(key): Path<String>,
    Json(request): Json<ProgressRequest>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.save_progress(&key, request.step, request.answers) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn clear_progress_handler<S, L>(
    State(service): State<Arc<AssessmentService<S, L>>>,
    Path(key): Path<String>,
) -> Response
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    match service.clear_progress(&key) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err),
    }
}

fn flow_error_response(err: FlowError) -> Response {
    match err {
        FlowError::Store(err) => store_error_response(err),
        FlowError::SessionComplete => {
            (StatusCode::CONFLICT, Json(json!({ "error": err.to_string() }))).into_response()
        }
        FlowError::AnswerRequired { ref question_id } => {
            let payload = json!({ "error": err.to_string(), "question_id": question_id });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        FlowError::InvalidEmail | FlowError::UnknownOrganization { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

fn store_error_response(err: RepositoryError) -> Response {
    let status = match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
