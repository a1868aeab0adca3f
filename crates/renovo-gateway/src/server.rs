// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes and shared state. The stores and classifier are
//! constructed once in the binary and passed in by handle -- handlers hold
//! no ambient globals.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use renovo_core::RenovoError;
use renovo_core::traits::{TaskStore, TranscriptionAdapter};
use renovo_intent::Classifier;
use renovo_store::MessageLog;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Task store handle.
    pub store: Arc<dyn TaskStore>,
    /// Message log handle.
    pub log: Arc<MessageLog>,
    /// Classifier selected at construction (heuristic or enhanced).
    pub classifier: Arc<Classifier>,
    /// Voice transcription capability, when configured.
    pub transcriber: Option<Arc<dyn TranscriptionAdapter>>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors `GatewayConfig` from renovo-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router with all routes and middleware.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/webhook/message", post(handlers::post_webhook_message))
        .route("/webhook/task-completed", post(handlers::post_task_completed))
        .route(
            "/v1/tasks",
            get(handlers::get_tasks).post(handlers::post_create_task),
        )
        .route(
            "/v1/tasks/{id}",
            get(handlers::get_task).delete(handlers::delete_task),
        )
        .route("/v1/messages", get(handlers::get_messages))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the gateway HTTP server and serves until the task is aborted.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), RenovoError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RenovoError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| RenovoError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_intent::IntentClassifier;
    use renovo_store::FsTaskStore;

    #[tokio::test]
    async fn gateway_state_is_clone() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTaskStore::open(dir.path().join("tasks")).await.unwrap();
        let log = MessageLog::open(dir.path().join("messages.json"), 100)
            .await
            .unwrap();
        let state = GatewayState {
            store: Arc::new(store),
            log: Arc::new(log),
            classifier: Arc::new(Classifier::Heuristic(IntentClassifier::default())),
            transcriber: None,
            start_time: std::time::Instant::now(),
        };
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
