use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use kai_profile::advisor::{advisor_router, AdvisorService};
use kai_profile::assessment::{assessment_router, AssessmentService, ProgressStore};
use kai_profile::directory::{directory_router, DirectoryService, DirectoryStore};
use kai_profile::leads::LeadPublisher;
use serde_json::json;
use std::sync::Arc;

/// Every API router plus the operational endpoints.
pub(crate) fn with_profile_routes<S, L>(
    assessment: Arc<AssessmentService<S, L>>,
    directory: Arc<DirectoryService<S>>,
    advisor: Arc<AdvisorService>,
) -> Router
where
    S: DirectoryStore + ProgressStore + 'static,
    L: LeadPublisher + 'static,
{
    assessment_router(assessment)
        .merge(directory_router(directory))
        .merge(advisor_router(advisor))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
