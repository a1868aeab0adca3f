// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock change agent and transcriber for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use renovo_core::RenovoError;
use renovo_core::traits::{ChangeAgent, TranscriptionAdapter};
use renovo_core::types::{TaskOutcome, TaskStatus};

/// A mock change agent that records dispatches and replays scripted
/// outcomes.
pub struct MockChangeAgent {
    outcomes: Arc<Mutex<VecDeque<TaskOutcome>>>,
    dispatched: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl MockChangeAgent {
    /// Create a mock that resolves every task as success.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            dispatched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with outcomes, replayed FIFO.
    pub fn with_outcomes(outcomes: Vec<TaskOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            dispatched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The (prompt, scope) pairs dispatched so far.
    pub async fn dispatched(&self) -> Vec<(String, Vec<String>)> {
        self.dispatched.lock().await.clone()
    }
}

impl Default for MockChangeAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeAgent for MockChangeAgent {
    async fn dispatch(&self, prompt: &str, scope: &[String]) -> Result<(), RenovoError> {
        self.dispatched
            .lock()
            .await
            .push((prompt.to_string(), scope.to_vec()));
        Ok(())
    }

    async fn await_outcome(&self, _task_id: &str) -> Result<TaskOutcome, RenovoError> {
        Ok(self.outcomes.lock().await.pop_front().unwrap_or(TaskOutcome {
            status: TaskStatus::Success,
            details: "mock outcome".to_string(),
        }))
    }
}

/// A mock transcriber returning a fixed transcription, or an error when
/// constructed with `failing()`.
pub struct MockTranscriber {
    text: Option<String>,
}

impl MockTranscriber {
    /// Create a transcriber that returns `text` for every media URL.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Create a transcriber that always fails.
    pub fn failing() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl TranscriptionAdapter for MockTranscriber {
    async fn transcribe(&self, _media_url: &str) -> Result<String, RenovoError> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(RenovoError::Provider {
                message: "mock transcription failure".to_string(),
                source: None,
            }),
        }
    }
}
