// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workflow driver for the Renovo change pipeline.
//!
//! Polls the task store for pending tasks in creation order, claims each
//! one exactly once, renders its instruction block, hands it to the
//! external change agent, and drives the terminal status transition --
//! including the optional auto-commit step.

pub mod editor;
pub mod processed;
pub mod prompt;
pub mod vcs;

pub use editor::EditorAgent;
pub use processed::ProcessedSet;
pub use vcs::GitCli;

use std::sync::Arc;
use std::time::Duration;

use renovo_core::RenovoError;
use renovo_core::traits::{ChangeAgent, TaskStore, Vcs};
use renovo_core::types::{Task, TaskStatus};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The workflow driver.
///
/// Single consumer: tasks are discovered oldest-first and their own
/// transitions stay strictly ordered. The durable [`ProcessedSet`] gates
/// re-processing across restarts.
pub struct TaskWatcher {
    store: Arc<dyn TaskStore>,
    agent: Arc<dyn ChangeAgent>,
    vcs: Option<Arc<dyn Vcs>>,
    processed: ProcessedSet,
    poll_interval: Duration,
    auto_commit_enabled: bool,
}

impl TaskWatcher {
    /// Creates a watcher over `store`, dispatching through `agent`.
    pub fn new(
        store: Arc<dyn TaskStore>,
        agent: Arc<dyn ChangeAgent>,
        processed: ProcessedSet,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            agent,
            vcs: None,
            processed,
            poll_interval,
            auto_commit_enabled: true,
        }
    }

    /// Attaches a version-control handle for the auto-commit step.
    pub fn with_vcs(mut self, vcs: Arc<dyn Vcs>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    /// Master switch for auto-commit; per-task eligibility still applies.
    pub fn with_auto_commit(mut self, enabled: bool) -> Self {
        self.auto_commit_enabled = enabled;
        self
    }

    /// Runs the poll loop until cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "task watcher started"
        );
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!(error = %e, "task poll failed (non-fatal)");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("task watcher shutting down");
                    break;
                }
            }
        }
    }

    /// One discovery pass: dispatches every unclaimed pending task in
    /// creation order. Returns the number of tasks handled.
    pub async fn poll_once(&self) -> Result<usize, RenovoError> {
        // list() is newest-first; the driver consumes oldest-first.
        let mut pending = self.store.list(Some(TaskStatus::Pending)).await?;
        pending.reverse();

        let mut handled = 0;
        for task in pending {
            // Check-and-set before any side effect: a re-discovered task
            // is never re-rendered or re-dispatched.
            if !self.processed.try_claim(&task.id).await? {
                debug!(task_id = %task.id, "task already dispatched, skipping");
                continue;
            }
            self.process(task).await;
            handled += 1;
        }
        Ok(handled)
    }

    /// Drives a single claimed task to a terminal status.
    async fn process(&self, task: Task) {
        info!(task_id = %task.id, task_type = %task.task_type, "processing task");

        if let Err(e) = self
            .store
            .update_status(&task.id, TaskStatus::Processing, "", None)
            .await
        {
            warn!(task_id = %task.id, error = %e, "failed to claim task");
            return;
        }

        let instruction = prompt::render(&task);
        if let Err(e) = self.agent.dispatch(&instruction, &task.scope).await {
            warn!(task_id = %task.id, error = %e, "dispatch failed");
            self.resolve(&task.id, TaskStatus::Failed, &format!("dispatch failed: {e}"))
                .await;
            return;
        }

        let outcome = match self.agent.await_outcome(&task.id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "no outcome signal");
                self.resolve(&task.id, TaskStatus::Failed, &format!("no outcome signal: {e}"))
                    .await;
                return;
            }
        };

        self.resolve(&task.id, outcome.status, &outcome.details).await;

        if outcome.status == TaskStatus::Success && task.auto_commit && self.auto_commit_enabled {
            self.commit(&task).await;
        }
    }

    async fn resolve(&self, task_id: &str, status: TaskStatus, details: &str) {
        if let Err(e) = self.store.update_status(task_id, status, details, None).await {
            warn!(task_id = %task_id, error = %e, "failed to resolve task");
        } else {
            info!(task_id = %task_id, status = %status, "task resolved");
        }
    }

    /// Auto-commit step. A failure here is reported but the task stays
    /// `success`.
    async fn commit(&self, task: &Task) {
        let Some(vcs) = &self.vcs else {
            debug!(task_id = %task.id, "auto-commit eligible but no vcs configured");
            return;
        };

        let message = format!(
            "auto: {}\n\nTask ID: {}\nType: {}",
            task.description, task.id, task.task_type
        );
        match vcs.commit_scope(&task.scope, &message).await {
            Ok(()) => info!(task_id = %task.id, "auto-commit complete"),
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "auto-commit failed; task remains success");
            }
        }
    }
}
