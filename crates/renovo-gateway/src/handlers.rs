// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Two surfaces: the messaging webhook (form-encoded, always answers with a
//! reply envelope) and the REST API for tasks and messages (JSON).

use axum::{
    Json,
    extract::{Form, Path, Query, State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use renovo_core::RenovoError;
use renovo_core::traits::{TaskStore as _, TranscriptionAdapter as _};
use renovo_core::types::{MessageKind, StoredMessage, Task, TaskDescriptor, TaskSource, TaskStatus, TaskType};

use crate::reply;
use crate::server::GatewayState;

/// Form payload of the messaging webhook (channel field names).
#[derive(Debug, Deserialize)]
pub struct WebhookForm {
    /// Sender identifier.
    #[serde(rename = "From", default)]
    pub from: String,
    /// Message body text.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Number of attached media items.
    #[serde(rename = "NumMedia", default)]
    pub num_media: u32,
    /// URL of the first media item.
    #[serde(rename = "MediaUrl0", default)]
    pub media_url0: Option<String>,
    /// Content type of the first media item.
    #[serde(rename = "MediaContentType0", default)]
    pub media_content_type0: Option<String>,
}

/// Request body for POST /v1/tasks (bypasses classification).
#[derive(Debug, Deserialize)]
pub struct ManualTaskRequest {
    /// Change category.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Free-text description.
    pub description: String,
    /// Files the change may touch.
    pub scope: Vec<String>,
    /// Constraints for the downstream agent.
    #[serde(default)]
    pub rules: Vec<String>,
    /// Requested auto-commit eligibility; narrowed to the safe subset.
    #[serde(default = "default_auto_commit")]
    pub auto_commit: bool,
}

fn default_auto_commit() -> bool {
    true
}

/// Request body for POST /webhook/task-completed.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    /// Task to resolve.
    pub task_id: String,
    /// Terminal status to apply.
    pub status: TaskStatus,
    /// Free-text outcome details.
    #[serde(default)]
    pub details: String,
    /// Optional structured outcome payload.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Response body for POST /webhook/task-completed.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub received: bool,
    pub task_id: String,
    pub status: TaskStatus,
}

/// Response body for GET / and GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// ISO 8601 timestamp.
    pub timestamp: String,
}

/// Response body for GET /v1/tasks.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
}

/// Response body for DELETE /v1/tasks/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub task_id: String,
}

/// Response body for GET /v1/messages.
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<StoredMessage>,
    pub count: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Query parameters for GET /v1/tasks.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// Optional status filter.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Query parameters for GET /v1/messages.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    /// Maximum messages to return.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Optional sender filter.
    #[serde(default)]
    pub sender: Option<String>,
    /// Optional timestamp lower bound.
    #[serde(default)]
    pub since: Option<String>,
}

/// Wraps a reply envelope in an XML response. Always 200: the messaging
/// channel retries aggressively on error statuses.
fn xml_reply(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

/// GET / and GET /health
pub async fn get_root(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        service: "renovo".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /health (same body as GET /).
pub async fn get_health(state: State<GatewayState>) -> Json<HealthResponse> {
    get_root(state).await
}

/// POST /webhook/message
///
/// Receives text messages and voice notes from the messaging channel and
/// turns them into tasks. Every path out of this handler is a reply
/// envelope -- malformed input, low confidence, and internal failures all
/// resolve to a message for the sender.
pub async fn post_webhook_message(
    State(state): State<GatewayState>,
    form: Result<Form<WebhookForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        // Unreadable payload still resolves to a reply, never an error
        // status the channel would retry.
        return xml_reply(reply::guidance());
    };
    let sender = form.from;
    let mut text = form.body;
    let mut kind = MessageKind::Text;
    let mut metadata = None;

    let has_audio = form.num_media > 0
        && form
            .media_content_type0
            .as_deref()
            .is_some_and(|ct| ct.contains("audio"));

    if has_audio {
        let Some(media_url) = form.media_url0.as_deref() else {
            return xml_reply(reply::transcription_unavailable());
        };
        let Some(transcriber) = &state.transcriber else {
            warn!("voice note received but no transcription service configured");
            return xml_reply(reply::transcription_unavailable());
        };
        match transcriber.transcribe(media_url).await {
            Ok(transcription) => {
                text = transcription;
                kind = MessageKind::Voice;
                metadata = Some(serde_json::json!({ "original_url": media_url }));
            }
            Err(e) => {
                warn!(error = %e, "voice transcription failed");
                return xml_reply(reply::transcription_unavailable());
            }
        }
    }

    // Fire-and-forget append: the log is independent of task creation.
    if let Err(e) = state.log.append(&sender, &text, kind, metadata).await {
        warn!(error = %e, "failed to append inbound message to log");
    }

    if text.trim().is_empty() {
        return xml_reply(reply::guidance());
    }

    let descriptor = state.classifier.classify(&text).await;
    if descriptor.confidence < state.classifier.confidence_threshold() {
        return xml_reply(reply::clarify());
    }

    let source = TaskSource {
        message: text.clone(),
        sender: sender.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    match state.store.create(descriptor, source).await {
        Ok(task) => xml_reply(reply::task_created(&task)),
        Err(e) => {
            error!(error = %e, "failed to create task from message");
            xml_reply(reply::internal_error())
        }
    }
}

/// POST /v1/tasks
///
/// Creates a task from a fully-structured descriptor, bypassing
/// classification. Auto-commit is still narrowed to the safe type subset.
pub async fn post_create_task(
    State(state): State<GatewayState>,
    Json(body): Json<ManualTaskRequest>,
) -> Response {
    if body.scope.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "scope must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let descriptor = TaskDescriptor {
        task_type: body.task_type,
        description: body.description,
        scope: body.scope,
        rules: body.rules,
        auto_commit: body.auto_commit && body.task_type.auto_commit_safe(),
        confidence: 1.0,
        target_repo: None,
    };
    let source = TaskSource {
        message: "Manual API request".to_string(),
        sender: "api".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    match state.store.create(descriptor, source).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => internal_error_response(e),
    }
}

/// GET /v1/tasks
pub async fn get_tasks(
    State(state): State<GatewayState>,
    Query(query): Query<TaskListQuery>,
) -> Response {
    match state.store.list(query.status).await {
        Ok(tasks) => {
            let count = tasks.len();
            Json(TaskListResponse { tasks, count }).into_response()
        }
        Err(e) => internal_error_response(e),
    }
}

/// GET /v1/tasks/{id}
pub async fn get_task(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get(&id).await {
        Ok(Some(task)) => Json(task).into_response(),
        Ok(None) => not_found_response(&id),
        Err(e) => internal_error_response(e),
    }
}

/// DELETE /v1/tasks/{id}
pub async fn delete_task(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete(&id).await {
        Ok(()) => Json(DeleteResponse {
            message: "task deleted".to_string(),
            task_id: id,
        })
        .into_response(),
        Err(RenovoError::TaskNotFound(_)) => not_found_response(&id),
        Err(e) => internal_error_response(e),
    }
}

/// GET /v1/messages
pub async fn get_messages(
    State(state): State<GatewayState>,
    Query(query): Query<MessageListQuery>,
) -> Json<MessageListResponse> {
    let limit = query.limit.unwrap_or(50);
    let messages = state
        .log
        .query(query.sender.as_deref(), limit, query.since.as_deref())
        .await;
    let count = messages.len();
    Json(MessageListResponse { messages, count })
}

/// POST /webhook/task-completed
///
/// Callback from the change-making environment: drives the terminal
/// transition for a task.
pub async fn post_task_completed(
    State(state): State<GatewayState>,
    Json(body): Json<CompletionRequest>,
) -> Response {
    if !body.status.is_terminal() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("status must be terminal, got `{}`", body.status),
            }),
        )
            .into_response();
    }

    match state
        .store
        .update_status(&body.task_id, body.status, &body.details, body.data)
        .await
    {
        Ok(task) => Json(CompletionResponse {
            received: true,
            task_id: task.id,
            status: body.status,
        })
        .into_response(),
        Err(RenovoError::TaskNotFound(_)) => not_found_response(&body.task_id),
        Err(e) => internal_error_response(e),
    }
}

fn not_found_response(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("task not found: {id}"),
        }),
    )
        .into_response()
}

fn internal_error_response(e: RenovoError) -> Response {
    error!(error = %e, "gateway request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_form_deserializes_channel_field_names() {
        let form: WebhookForm = serde_urlencoded::from_str(
            "From=whatsapp%3A%2B1555&Body=change+the+hero+text&NumMedia=0",
        )
        .unwrap();
        assert_eq!(form.from, "whatsapp:+1555");
        assert_eq!(form.body, "change the hero text");
        assert_eq!(form.num_media, 0);
        assert!(form.media_url0.is_none());
    }

    #[test]
    fn webhook_form_defaults_for_missing_fields() {
        let form: WebhookForm = serde_urlencoded::from_str("From=user").unwrap();
        assert_eq!(form.body, "");
        assert_eq!(form.num_media, 0);
    }

    #[test]
    fn webhook_form_with_media_fields() {
        let form: WebhookForm = serde_urlencoded::from_str(
            "From=u&Body=&NumMedia=1&MediaUrl0=https%3A%2F%2Fm.example%2Fa&MediaContentType0=audio%2Fogg",
        )
        .unwrap();
        assert_eq!(form.num_media, 1);
        assert_eq!(form.media_url0.as_deref(), Some("https://m.example/a"));
        assert_eq!(form.media_content_type0.as_deref(), Some("audio/ogg"));
    }

    #[test]
    fn manual_task_request_deserializes() {
        let json = r#"{
            "type": "copy_change",
            "description": "change text",
            "scope": ["app/components/Hero.tsx"]
        }"#;
        let req: ManualTaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.task_type, TaskType::CopyChange);
        assert!(req.rules.is_empty());
        assert!(req.auto_commit);
    }

    #[test]
    fn completion_request_deserializes() {
        let json = r#"{"task_id": "abc12345", "status": "manual_review", "details": "needs human check"}"#;
        let req: CompletionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.task_id, "abc12345");
        assert_eq!(req.status, TaskStatus::ManualReview);
        assert_eq!(req.details, "needs human check");
        assert!(req.data.is_none());
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "task not found: abc".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("task not found"));
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "running".to_string(),
            service: "renovo".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"running\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }

    #[test]
    fn task_list_query_parses_status() {
        let q: TaskListQuery = serde_urlencoded::from_str("status=pending").unwrap();
        assert_eq!(q.status, Some(TaskStatus::Pending));
        let q: TaskListQuery = serde_urlencoded::from_str("").unwrap();
        assert!(q.status.is_none());
    }
}
