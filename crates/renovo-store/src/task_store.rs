// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-per-task JSON store with an archive partition.
//!
//! Active records live as `CHANGE-<id>.json` under the tasks directory;
//! terminal records are relocated into `archive/` with the same filename.
//! Every write goes through temp-file-plus-rename so readers never observe
//! a half-written record, and all writes serialize through a single guard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use renovo_core::traits::{RemoteTaskWriter, TaskStore};
use renovo_core::types::{Task, TaskDescriptor, TaskResult, TaskSource, TaskStatus};
use renovo_core::RenovoError;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Filename prefix for task record files.
const TASK_FILE_PREFIX: &str = "CHANGE-";

/// File-backed [`TaskStore`] implementation.
pub struct FsTaskStore {
    tasks_dir: PathBuf,
    archive_dir: PathBuf,
    remote: Option<Arc<dyn RemoteTaskWriter>>,
    write_guard: Mutex<()>,
}

impl FsTaskStore {
    /// Opens the store, creating the tasks and archive directories.
    pub async fn open(tasks_dir: impl Into<PathBuf>) -> Result<Self, RenovoError> {
        let tasks_dir = tasks_dir.into();
        let archive_dir = tasks_dir.join("archive");
        tokio::fs::create_dir_all(&archive_dir)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
        Ok(Self {
            tasks_dir,
            archive_dir,
            remote: None,
            write_guard: Mutex::new(()),
        })
    }

    /// Attaches a remote task writer that mirrors records on create.
    ///
    /// Mirroring is fire-and-forget: failures are logged and never affect
    /// the local lifecycle.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteTaskWriter>) -> Self {
        self.remote = Some(remote);
        self
    }

    fn active_path(&self, id: &str) -> PathBuf {
        self.tasks_dir.join(format!("{TASK_FILE_PREFIX}{id}.json"))
    }

    fn archive_path(&self, id: &str) -> PathBuf {
        self.archive_dir.join(format!("{TASK_FILE_PREFIX}{id}.json"))
    }
}

/// Generates a short collision-resistant task id (8 hex chars of a v4 UUID).
fn new_task_id() -> String {
    let full = uuid::Uuid::new_v4().simple().to_string();
    full[..8].to_string()
}

/// Current UTC time as an ISO-8601 string with sub-second precision.
pub(crate) fn now_iso8601() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.6fZ")
        .to_string()
}

/// Writes `task` as pretty JSON via temp-file-plus-rename.
async fn write_task_file(path: &Path, task: &Task) -> Result<(), RenovoError> {
    let json = serde_json::to_string_pretty(task).map_err(|e| RenovoError::Storage {
        source: Box::new(e),
    })?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| RenovoError::Storage {
            source: Box::new(e),
        })?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| RenovoError::Storage {
            source: Box::new(e),
        })
}

/// Reads and parses a task file, or `None` if it does not exist.
async fn read_task_file(path: &Path) -> Result<Option<Task>, RenovoError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let task = serde_json::from_str(&content).map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
            Ok(Some(task))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RenovoError::Storage {
            source: Box::new(e),
        }),
    }
}

#[async_trait]
impl TaskStore for FsTaskStore {
    async fn create(
        &self,
        descriptor: TaskDescriptor,
        source: TaskSource,
    ) -> Result<Task, RenovoError> {
        let task = Task {
            id: new_task_id(),
            task_type: descriptor.task_type,
            description: descriptor.description,
            scope: descriptor.scope,
            rules: descriptor.rules,
            auto_commit: descriptor.auto_commit,
            status: TaskStatus::Pending,
            created_at: now_iso8601(),
            updated_at: None,
            source,
            result: None,
        };

        {
            let _guard = self.write_guard.lock().await;
            write_task_file(&self.active_path(&task.id), &task).await?;
        }
        debug!(task_id = %task.id, task_type = %task.task_type, "task created");

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let mirror = task.clone();
            tokio::spawn(async move {
                if let Err(e) = remote.put_task(&mirror).await {
                    warn!(task_id = %mirror.id, error = %e, "remote task mirror failed");
                }
            });
        }

        Ok(task)
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, RenovoError> {
        if let Some(task) = read_task_file(&self.active_path(id)).await? {
            return Ok(Some(task));
        }
        read_task_file(&self.archive_path(id)).await
    }

    async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, RenovoError> {
        let mut entries =
            tokio::fs::read_dir(&self.tasks_dir)
                .await
                .map_err(|e| RenovoError::Storage {
                    source: Box::new(e),
                })?;

        let mut tasks = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| RenovoError::Storage {
            source: Box::new(e),
        })? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(TASK_FILE_PREFIX) || !name.ends_with(".json") {
                continue;
            }
            // A single unreadable record never aborts the listing.
            match read_task_file(&entry.path()).await {
                Ok(Some(task)) => {
                    if status.is_none_or(|s| task.status == s) {
                        tasks.push(task);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(file = %name, error = %e, "skipping unreadable task record");
                }
            }
        }

        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_status(
        &self,
        id: &str,
        status: TaskStatus,
        details: &str,
        data: Option<serde_json::Value>,
    ) -> Result<Task, RenovoError> {
        if status == TaskStatus::Pending {
            return Err(RenovoError::Internal(
                "tasks cannot transition back to pending".to_string(),
            ));
        }

        let _guard = self.write_guard.lock().await;

        let active = self.active_path(id);
        let Some(mut task) = read_task_file(&active).await? else {
            return Err(RenovoError::TaskNotFound(id.to_string()));
        };

        task.status = status;
        task.updated_at = Some(now_iso8601());
        if status.is_terminal() {
            task.result = Some(TaskResult {
                status,
                details: details.to_string(),
                data,
            });
        }

        write_task_file(&active, &task).await?;

        if status.is_terminal() {
            tokio::fs::rename(&active, self.archive_path(id))
                .await
                .map_err(|e| RenovoError::Storage {
                    source: Box::new(e),
                })?;
            debug!(task_id = %id, status = %status, "task archived");
        } else {
            debug!(task_id = %id, status = %status, "task status updated");
        }

        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<(), RenovoError> {
        let _guard = self.write_guard.lock().await;
        match tokio::fs::remove_file(self.active_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RenovoError::TaskNotFound(id.to_string()))
            }
            Err(e) => Err(RenovoError::Storage {
                source: Box::new(e),
            }),
        }
    }
}
