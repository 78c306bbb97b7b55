use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::chat::{ChatContext, ChatError};
use super::roadmap::RoadmapContext;
use super::service::{AdvisorService, ChatRequestError};

/// Router exposing roadmap generation and chat sessions.
pub fn advisor_router(service: Arc<AdvisorService>) -> Router {
    Router::new()
        .route("/api/v1/advisor/roadmap", post(roadmap_handler))
        .route("/api/v1/advisor/chat", post(open_chat_handler))
        .route(
            "/api/v1/advisor/chat/:session_id/messages",
            post(message_handler),
        )
        .route("/api/v1/advisor/chat/:session_id", delete(close_chat_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageRequest {
    text: String,
}

pub(crate) async fn roadmap_handler(
    State(service): State<Arc<AdvisorService>>,
    Json(context): Json<RoadmapContext>,
) -> Response {
    let cancel = service.shutdown_token().child_token();
    match service.generate_roadmap(&context, &cancel).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn open_chat_handler(
    State(service): State<Arc<AdvisorService>>,
    Json(context): Json<ChatContext>,
) -> Response {
    match service.open_chat(&context) {
        Ok((session_id, greeting)) => {
            let payload = json!({ "session_id": session_id, "greeting": greeting });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => chat_error_response(err),
    }
}

pub(crate) async fn message_handler(
    State(service): State<Arc<AdvisorService>>,
    Path(session_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Response {
    match service.send_chat(&session_id, &request.text).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "reply": reply }))).into_response(),
        Err(err) => chat_error_response(err),
    }
}

pub(crate) async fn close_chat_handler(
    State(service): State<Arc<AdvisorService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.close_chat(&session_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => chat_error_response(err),
    }
}

fn chat_error_response(err: ChatRequestError) -> Response {
    let status = match &err {
        ChatRequestError::UnknownSession => StatusCode::NOT_FOUND,
        ChatRequestError::ReplyPending => StatusCode::CONFLICT,
        ChatRequestError::Chat(ChatError::EmptyMessage) => StatusCode::UNPROCESSABLE_ENTITY,
        ChatRequestError::Chat(ChatError::Cancelled) => StatusCode::GONE,
        ChatRequestError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
