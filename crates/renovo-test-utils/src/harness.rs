// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete pipeline with a temp task store,
//! message log, classifier, and gateway router. Tests drive the axum
//! router directly (no TCP listener) and inspect the stores afterwards.

use std::sync::Arc;
use std::time::Duration;

use renovo_config::model::IntentConfig;
use renovo_core::RenovoError;
use renovo_core::traits::{TaskStore, TranscriptionAdapter, UnderstandingAdapter};
use renovo_core::types::TaskDescriptor;
use renovo_gateway::{GatewayState, build_router};
use renovo_intent::{Classifier, EnhancedClassifier, IntentClassifier};
use renovo_store::{FsTaskStore, MessageLog};

use crate::mock_understanding::MockUnderstanding;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    descriptors: Option<Vec<TaskDescriptor>>,
    transcriber: Option<Arc<dyn TranscriptionAdapter>>,
    message_cap: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            descriptors: None,
            transcriber: None,
            message_cap: 1000,
        }
    }

    /// Use the enhanced classification path with scripted descriptors.
    pub fn with_understanding_descriptors(mut self, descriptors: Vec<TaskDescriptor>) -> Self {
        self.descriptors = Some(descriptors);
        self
    }

    /// Attach a transcription capability.
    pub fn with_transcriber(mut self, transcriber: Arc<dyn TranscriptionAdapter>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Override the message log cap.
    pub fn with_message_cap(mut self, cap: usize) -> Self {
        self.message_cap = cap;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, RenovoError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| RenovoError::Storage { source: e.into() })?;

        let store = Arc::new(FsTaskStore::open(temp_dir.path().join("tasks")).await?);
        let log = Arc::new(
            MessageLog::open(temp_dir.path().join("messages.json"), self.message_cap).await?,
        );

        let heuristic = IntentClassifier::new(&IntentConfig::default());
        let classifier = match self.descriptors {
            Some(descriptors) => {
                let adapter: Arc<dyn UnderstandingAdapter> =
                    Arc::new(MockUnderstanding::with_descriptors(descriptors));
                Classifier::Enhanced(EnhancedClassifier::new(
                    adapter,
                    heuristic,
                    Duration::from_secs(5),
                ))
            }
            None => Classifier::Heuristic(heuristic),
        };

        let state = GatewayState {
            store: store.clone(),
            log: log.clone(),
            classifier: Arc::new(classifier),
            transcriber: self.transcriber,
            start_time: std::time::Instant::now(),
        };

        Ok(TestHarness {
            store,
            log,
            state,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully-assembled test pipeline over temp storage.
pub struct TestHarness {
    /// Task store handle for direct inspection.
    pub store: Arc<FsTaskStore>,
    /// Message log handle for direct inspection.
    pub log: Arc<MessageLog>,
    /// Gateway state (also reachable through [`TestHarness::router`]).
    pub state: GatewayState,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Build the gateway router over this harness's state.
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// The task store as a trait handle.
    pub fn store_handle(&self) -> Arc<dyn TaskStore> {
        self.store.clone()
    }
}
