// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only bounded message log.
//!
//! Independent of task state: a message may exist with no resulting task.
//! The log is a single JSON file capped at a fixed retained count; oldest
//! entries are evicted first. An unreadable log file is treated as empty
//! rather than an error.

use std::path::PathBuf;

use renovo_core::RenovoError;
use renovo_core::types::{MessageKind, StoredMessage};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::task_store::now_iso8601;

/// Bounded FIFO log of inbound messages.
pub struct MessageLog {
    path: PathBuf,
    cap: usize,
    write_guard: Mutex<()>,
}

impl MessageLog {
    /// Opens the log, creating the parent directory if needed.
    pub async fn open(path: impl Into<PathBuf>, cap: usize) -> Result<Self, RenovoError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RenovoError::Storage {
                    source: Box::new(e),
                })?;
        }
        Ok(Self {
            path,
            cap,
            write_guard: Mutex::new(()),
        })
    }

    /// Appends a message, evicting the oldest entries beyond the cap.
    pub async fn append(
        &self,
        sender: &str,
        content: &str,
        kind: MessageKind,
        metadata: Option<serde_json::Value>,
    ) -> Result<StoredMessage, RenovoError> {
        let message = StoredMessage {
            id: uuid::Uuid::new_v4().to_string(),
            sender: sender.to_string(),
            content: content.to_string(),
            kind,
            metadata,
            timestamp: now_iso8601(),
        };

        let _guard = self.write_guard.lock().await;
        let mut messages = self.load().await;
        messages.push(message.clone());
        if messages.len() > self.cap {
            let excess = messages.len() - self.cap;
            messages.drain(..excess);
        }
        self.save(&messages).await?;

        debug!(sender = %message.sender, kind = %message.kind, "message logged");
        Ok(message)
    }

    /// Queries messages newest-first, filtered by sender and/or a
    /// timestamp lower bound, truncated to `limit`.
    pub async fn query(
        &self,
        sender: Option<&str>,
        limit: usize,
        since: Option<&str>,
    ) -> Vec<StoredMessage> {
        let mut messages = self.load().await;

        if let Some(sender) = sender {
            messages.retain(|m| m.sender == sender);
        }
        if let Some(since) = since {
            messages.retain(|m| m.timestamp.as_str() > since);
        }

        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        messages.truncate(limit);
        messages
    }

    /// Conversation history for a single sender.
    pub async fn conversation(&self, sender: &str, limit: usize) -> Vec<StoredMessage> {
        self.query(Some(sender), limit, None).await
    }

    async fn load(&self) -> Vec<StoredMessage> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(error = %e, "message log unreadable, treating as empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(error = %e, "message log unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, messages: &[StoredMessage]) -> Result<(), RenovoError> {
        let json = serde_json::to_string_pretty(messages).map_err(|e| RenovoError::Storage {
            source: Box::new(e),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RenovoError::Storage {
                source: Box::new(e),
            })
    }
}
