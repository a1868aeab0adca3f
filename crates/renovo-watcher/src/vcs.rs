// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Git command-line implementation of the [`Vcs`] trait.

use std::path::PathBuf;

use async_trait::async_trait;
use renovo_core::RenovoError;
use renovo_core::traits::Vcs;
use tracing::info;

/// [`Vcs`] backed by the `git` binary in the target repository.
pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    /// Creates a git wrapper operating in `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), RenovoError> {
        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| RenovoError::Provider {
                message: format!("failed to run git {}: {e}", args.join(" ")),
                source: Some(Box::new(e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenovoError::Provider {
                message: format!("git {} failed: {}", args.join(" "), stderr.trim()),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn commit_scope(&self, scope: &[String], message: &str) -> Result<(), RenovoError> {
        // Stage exactly the scoped files; nothing else rides along.
        for file in scope {
            self.run(&["add", file]).await?;
        }
        self.run(&["commit", "-m", message]).await?;
        self.run(&["push"]).await?;
        info!(files = scope.len(), "auto-commit pushed");
        Ok(())
    }
}
