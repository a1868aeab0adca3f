// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renovo watch` command implementation.
//!
//! Standalone workflow driver for setups that run the gateway elsewhere:
//! polls the shared tasks directory, dispatches pending tasks through the
//! interactive editor agent, and resolves their outcomes.

use std::sync::Arc;
use std::time::Duration;

use renovo_config::model::RenovoConfig;
use renovo_core::RenovoError;
use renovo_store::FsTaskStore;
use renovo_watcher::{EditorAgent, GitCli, ProcessedSet, TaskWatcher};
use tracing::info;

use crate::serve::init_tracing;
use crate::shutdown;

/// Runs the `renovo watch` command.
pub async fn run_watch(config: RenovoConfig) -> Result<(), RenovoError> {
    init_tracing(&config.agent.log_level);

    let store = Arc::new(FsTaskStore::open(&config.store.tasks_dir).await?);
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
        store,
        agent,
        processed,
        Duration::from_secs(config.watcher.poll_interval_secs),
    )
    .with_vcs(Arc::new(GitCli::new(config.watcher.target_repo.clone())))
    .with_auto_commit(config.watcher.auto_commit_enabled);

    info!(
        tasks_dir = %config.store.tasks_dir,
        target_repo = %config.watcher.target_repo,
        "watching for tasks (Ctrl+C to stop)"
    );

    let cancel = shutdown::install_signal_handler();
    watcher.run(cancel).await;

    Ok(())
}
