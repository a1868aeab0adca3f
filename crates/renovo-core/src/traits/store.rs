// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task store trait: durable task records with status transitions and archival.

use async_trait::async_trait;

use crate::error::RenovoError;
use crate::types::{Task, TaskDescriptor, TaskSource, TaskStatus};

/// Durable mapping from task id to task record.
///
/// The store exclusively owns task records once created. Status only moves
/// forward (`pending -> processing -> terminal`); resolving to a terminal
/// status relocates the record to an archive partition keyed by the same id.
///
/// The backing medium is an implementation detail -- callers must not
/// assume file-per-task layout.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Creates a new task at `pending` from a classifier descriptor.
    async fn create(
        &self,
        descriptor: TaskDescriptor,
        source: TaskSource,
    ) -> Result<Task, RenovoError>;

    /// Resolves an id from the active or archive partition transparently.
    async fn get(&self, id: &str) -> Result<Option<Task>, RenovoError>;

    /// Lists active tasks newest-first, optionally narrowed by status.
    ///
    /// A single unreadable record is skipped with a warning; it never
    /// aborts the listing.
    async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, RenovoError>;

    /// Advances a task's status, stamping `updated_at` and filling `result`.
    ///
    /// Terminal statuses relocate the record into the archive partition.
    /// Returns [`RenovoError::TaskNotFound`] when no active record exists
    /// (terminal tasks cannot be updated again).
    async fn update_status(
        &self,
        id: &str,
        status: TaskStatus,
        details: &str,
        data: Option<serde_json::Value>,
    ) -> Result<Task, RenovoError>;

    /// Deletes an active task. Archived tasks are out of contract and
    /// report not-found.
    async fn delete(&self, id: &str) -> Result<(), RenovoError>;
}
