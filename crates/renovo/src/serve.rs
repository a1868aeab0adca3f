// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renovo serve` command implementation.
//!
//! Starts the full pipeline: task store and message log, classifier
//! (enhanced when an understanding service is configured, heuristic
//! otherwise), the HTTP gateway, and optionally the workflow watcher.
//! All stores are constructed once here and passed by handle -- no
//! ambient globals.

use std::sync::Arc;
use std::time::Duration;

use renovo_config::model::RenovoConfig;
use renovo_core::RenovoError;
use renovo_core::traits::{TranscriptionAdapter, UnderstandingAdapter};
use renovo_gateway::{GatewayState, ServerConfig};
use renovo_intent::{Classifier, EnhancedClassifier, IntentClassifier};
use renovo_openai::OpenAiService;
use renovo_store::{FsTaskStore, MessageLog};
use renovo_watcher::{EditorAgent, GitCli, ProcessedSet, TaskWatcher};
use tracing::{debug, info, warn};

use crate::shutdown;

/// Runs the `renovo serve` command.
pub async fn run_serve(config: RenovoConfig) -> Result<(), RenovoError> {
    init_tracing(&config.agent.log_level);

    info!("starting renovo serve");

    // Storage: file-per-task store plus the bounded message log.
    let mut store = FsTaskStore::open(&config.store.tasks_dir).await?;
    match renovo_github::from_config(&config.github)? {
        Some(writer) => {
            info!(repo = %config.github.repo, "remote task mirroring enabled");
            store = store.with_remote(Arc::new(writer));
        }
        None => {
            debug!("remote task mirroring disabled");
        }
    }
    let store = Arc::new(store);
    let log = Arc::new(
        MessageLog::open(&config.store.messages_path, config.store.message_cap).await?,
    );

    // Classifier and transcriber capabilities, selected once here.
    let heuristic = IntentClassifier::new(&config.intent);
    let openai = OpenAiService::from_config(&config.openai)?.map(Arc::new);

    let classifier = match &openai {
        Some(service) => {
            info!(model = %config.openai.model, "enhanced classification enabled");
            let adapter: Arc<dyn UnderstandingAdapter> = service.clone();
            Classifier::Enhanced(EnhancedClassifier::new(
                adapter,
                heuristic,
                Duration::from_secs(config.openai.timeout_secs),
            ))
        }
        None => {
            info!("no understanding service configured, using heuristic classification");
            Classifier::Heuristic(heuristic)
        }
    };

    let transcriber: Option<Arc<dyn TranscriptionAdapter>> = openai
        .as_ref()
        .map(|service| service.clone() as Arc<dyn TranscriptionAdapter>);

    let cancel = shutdown::install_signal_handler();

    // Optional workflow watcher alongside the gateway.
    if config.watcher.enabled {
        let processed = ProcessedSet::load(
            std::path::Path::new(&config.store.tasks_dir).join(".processed"),
        )
        .await?;
        let agent = Arc::new(EditorAgent::new(
            config.watcher.editor_command.clone(),
            config.watcher.target_repo.clone(),
            config.store.tasks_dir.clone(),
        ));
        let watcher = TaskWatcher::new(
            store.clone(),
            agent,
            processed,
            Duration::from_secs(config.watcher.poll_interval_secs),
        )
        .with_vcs(Arc::new(GitCli::new(config.watcher.target_repo.clone())))
        .with_auto_commit(config.watcher.auto_commit_enabled);

        let watcher_cancel = cancel.clone();
        tokio::spawn(async move {
            watcher.run(watcher_cancel).await;
        });
        info!(
            poll_interval_secs = config.watcher.poll_interval_secs,
            target_repo = %config.watcher.target_repo,
            "task watcher started"
        );
    } else {
        debug!("task watcher disabled by configuration");
    }

    if !config.gateway.enabled {
        warn!("gateway disabled by configuration, nothing to serve");
        cancel.cancelled().await;
        return Ok(());
    }

    let state = GatewayState {
        store,
        log,
        classifier: Arc::new(classifier),
        transcriber,
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    tokio::select! {
        result = renovo_gateway::start_server(&server_config, state) => {
            result?;
        }
        _ = cancel.cancelled() => {
            info!("shutdown signal received");
        }
    }

    info!("renovo serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("renovo={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
