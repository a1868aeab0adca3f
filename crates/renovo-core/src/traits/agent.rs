// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change-agent trait: the external environment that applies a change.

use async_trait::async_trait;

use crate::error::RenovoError;
use crate::types::TaskOutcome;

/// Adapter for the external change-making agent and editor environment.
///
/// The workflow driver renders an instruction block, hands it to this
/// adapter together with the scoped files, and then awaits an outcome
/// signal (human confirmation or callback).
#[async_trait]
pub trait ChangeAgent: Send + Sync + 'static {
    /// Seeds the environment with the scoped files and the instruction block.
    async fn dispatch(&self, prompt: &str, scope: &[String]) -> Result<(), RenovoError>;

    /// Waits for the external outcome signal for the given task.
    async fn await_outcome(&self, task_id: &str) -> Result<TaskOutcome, RenovoError>;
}
