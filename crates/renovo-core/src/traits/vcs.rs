// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Version-control trait for the auto-commit step.

use async_trait::async_trait;

use crate::error::RenovoError;

/// Adapter for the version-control tool used on auto-commit.
///
/// Stages exactly the listed files, commits with the given message, and
/// pushes. A failure here is reported but never reverts a task's
/// `success` status.
#[async_trait]
pub trait Vcs: Send + Sync + 'static {
    /// Stages `scope`, commits with `message`, and pushes.
    async fn commit_scope(&self, scope: &[String], message: &str) -> Result<(), RenovoError>;
}
