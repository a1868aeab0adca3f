// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote task-record writer trait.

use async_trait::async_trait;

use crate::error::RenovoError;
use crate::types::Task;

/// Adapter for mirroring task records to an external repository.
///
/// There is exactly one call path: when unconfigured, a no-op
/// implementation is selected at construction time instead of branching
/// at each call site. Mirror failures are logged by the caller and never
/// affect the local task lifecycle.
#[async_trait]
pub trait RemoteTaskWriter: Send + Sync + 'static {
    /// Persists the task record externally, keyed by task id.
    async fn put_task(&self, task: &Task) -> Result<(), RenovoError>;
}
