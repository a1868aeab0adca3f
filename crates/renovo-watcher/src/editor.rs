// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive editor-backed change agent.
//!
//! Dispatch writes the instruction block to a prompt file and opens the
//! scoped files in the configured editor. The outcome signal is read from
//! the operator on stdin: `y` success, `n` failed, `m` manual review.

use std::path::PathBuf;

use async_trait::async_trait;
use renovo_core::RenovoError;
use renovo_core::traits::ChangeAgent;
use renovo_core::types::{TaskOutcome, TaskStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Name of the prompt file written next to the task records.
const PROMPT_FILE: &str = "AGENT_PROMPT.md";

/// [`ChangeAgent`] that seeds a local editor and asks the operator for
/// the outcome.
pub struct EditorAgent {
    editor_command: String,
    target_repo: PathBuf,
    prompt_dir: PathBuf,
}

impl EditorAgent {
    /// Creates an agent opening files under `target_repo` with
    /// `editor_command`, writing prompts into `prompt_dir`.
    pub fn new(
        editor_command: impl Into<String>,
        target_repo: impl Into<PathBuf>,
        prompt_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            editor_command: editor_command.into(),
            target_repo: target_repo.into(),
            prompt_dir: prompt_dir.into(),
        }
    }

    /// Path of the last written prompt file.
    pub fn prompt_path(&self) -> PathBuf {
        self.prompt_dir.join(PROMPT_FILE)
    }
}

#[async_trait]
impl ChangeAgent for EditorAgent {
    async fn dispatch(&self, prompt: &str, scope: &[String]) -> Result<(), RenovoError> {
        tokio::fs::create_dir_all(&self.prompt_dir)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
        let prompt_path = self.prompt_path();
        tokio::fs::write(&prompt_path, prompt)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
        info!(path = %prompt_path.display(), "instruction block written");

        // Only existing files are opened; a missing scope entry is the
        // agent's problem to create, not ours to invent.
        let mut existing = Vec::new();
        for file in scope {
            let full = self.target_repo.join(file);
            if tokio::fs::try_exists(&full).await.unwrap_or(false) {
                existing.push(full);
            } else {
                warn!(file = %file, "scoped file not found in target repo");
            }
        }

        if !existing.is_empty() {
            tokio::process::Command::new(&self.editor_command)
                .args(&existing)
                .spawn()
                .map_err(|e| RenovoError::Provider {
                    message: format!("failed to launch editor `{}`: {e}", self.editor_command),
                    source: Some(Box::new(e)),
                })?;
        }

        Ok(())
    }

    async fn await_outcome(&self, task_id: &str) -> Result<TaskOutcome, RenovoError> {
        println!("Task {task_id} dispatched. Apply the change, then answer:");
        println!("  y = success / n = failed / m = manual review");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            let line = lines.next_line().await.map_err(|e| RenovoError::Channel {
                message: format!("failed to read outcome from stdin: {e}"),
                source: Some(Box::new(e)),
            })?;
            let Some(line) = line else {
                return Err(RenovoError::Channel {
                    message: "stdin closed before an outcome was given".to_string(),
                    source: None,
                });
            };

            match line.trim().to_lowercase().as_str() {
                "y" => {
                    return Ok(TaskOutcome {
                        status: TaskStatus::Success,
                        details: "Completed via watcher".to_string(),
                    });
                }
                "n" => {
                    return Ok(TaskOutcome {
                        status: TaskStatus::Failed,
                        details: "Failed via watcher".to_string(),
                    });
                }
                "m" => {
                    return Ok(TaskOutcome {
                        status: TaskStatus::ManualReview,
                        details: "Requires manual review".to_string(),
                    });
                }
                other => {
                    println!("Unrecognized answer `{other}`: expected y, n, or m");
                }
            }
        }
    }
}
