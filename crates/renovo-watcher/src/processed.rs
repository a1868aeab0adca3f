// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable "already seen" marker for dispatched tasks.
//!
//! One task id per line in a `.processed` file next to the task records.
//! The in-memory set and the file append happen under one lock so a task
//! id can only be claimed once even under concurrent discovery.

use std::collections::HashSet;
use std::path::PathBuf;

use renovo_core::RenovoError;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Durable set of task ids the watcher has already dispatched.
pub struct ProcessedSet {
    path: PathBuf,
    seen: Mutex<HashSet<String>>,
}

impl ProcessedSet {
    /// Loads the marker file, creating the parent directory if needed.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, RenovoError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RenovoError::Storage {
                    source: Box::new(e),
                })?;
        }

        let seen = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                return Err(RenovoError::Storage {
                    source: Box::new(e),
                });
            }
        };

        Ok(Self {
            path,
            seen: Mutex::new(seen),
        })
    }

    /// Atomically claims a task id.
    ///
    /// Returns `true` exactly once per id; every later call returns
    /// `false`. The marker is appended to the file before the claim is
    /// visible, so a restart never re-dispatches a claimed task.
    pub async fn try_claim(&self, id: &str) -> Result<bool, RenovoError> {
        let mut seen = self.seen.lock().await;
        if seen.contains(id) {
            return Ok(false);
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
        file.write_all(format!("{id}\n").as_bytes())
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;

        seen.insert(id.to_string());
        Ok(true)
    }

    /// Whether an id has already been claimed.
    pub async fn contains(&self, id: &str) -> bool {
        self.seen.lock().await.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn claim_succeeds_exactly_once() {
        let dir = tempdir().unwrap();
        let set = ProcessedSet::load(dir.path().join(".processed")).await.unwrap();

        assert!(set.try_claim("abc12345").await.unwrap());
        assert!(!set.try_claim("abc12345").await.unwrap());
        assert!(set.contains("abc12345").await);
    }

    #[tokio::test]
    async fn claims_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".processed");

        {
            let set = ProcessedSet::load(&path).await.unwrap();
            set.try_claim("task-one").await.unwrap();
            set.try_claim("task-two").await.unwrap();
        }

        let reloaded = ProcessedSet::load(&path).await.unwrap();
        assert!(!reloaded.try_claim("task-one").await.unwrap());
        assert!(!reloaded.try_claim("task-two").await.unwrap());
        assert!(reloaded.try_claim("task-three").await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_claims_yield_a_single_winner() {
        let dir = tempdir().unwrap();
        let set = std::sync::Arc::new(
            ProcessedSet::load(dir.path().join(".processed")).await.unwrap(),
        );

        let mut handles = Vec::new();
        for _ in 0..10 {
            let set = std::sync::Arc::clone(&set);
            handles.push(tokio::spawn(async move {
                set.try_claim("contested").await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
