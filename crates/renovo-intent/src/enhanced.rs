// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed classification with bounded-time fail-soft fallback.
//!
//! Wraps an [`UnderstandingAdapter`] behind a fixed timeout. Any error,
//! timeout, or malformed output falls through to the heuristic classifier
//! silently -- classification never blocks or errors out to the sender.

use std::sync::Arc;
use std::time::Duration;

use renovo_core::traits::UnderstandingAdapter;
use renovo_core::types::TaskDescriptor;
use tracing::{debug, warn};

use crate::classifier::IntentClassifier;

/// Classifier that prefers an external understanding service and degrades
/// to local heuristic rules.
///
/// The two variants ("enhanced" and "heuristic") share one call path:
/// construct with [`EnhancedClassifier::new`] when the service is
/// configured, or use the bare [`IntentClassifier`] when it is not.
pub struct EnhancedClassifier {
    adapter: Arc<dyn UnderstandingAdapter>,
    heuristic: IntentClassifier,
    timeout: Duration,
}

impl EnhancedClassifier {
    /// Wrap an understanding adapter with a per-call timeout and a
    /// heuristic fallback.
    pub fn new(
        adapter: Arc<dyn UnderstandingAdapter>,
        heuristic: IntentClassifier,
        timeout: Duration,
    ) -> Self {
        Self {
            adapter,
            heuristic,
            timeout,
        }
    }

    /// The confidence threshold of the underlying heuristic classifier.
    pub fn confidence_threshold(&self) -> f32 {
        self.heuristic.confidence_threshold()
    }

    /// Classify a message, preferring the external service.
    ///
    /// Never fails: on any adapter error or timeout the heuristic result
    /// is returned instead, and the failure is only logged.
    pub async fn classify(&self, message: &str) -> TaskDescriptor {
        match tokio::time::timeout(self.timeout, self.adapter.parse(message)).await {
            Ok(Ok(descriptor)) => {
                debug!(
                    task_type = %descriptor.task_type,
                    confidence = descriptor.confidence,
                    "enhanced classification succeeded"
                );
                self.normalize(descriptor, message)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "understanding service failed, using heuristic");
                self.heuristic.classify(message)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "understanding service timed out, using heuristic"
                );
                self.heuristic.classify(message)
            }
        }
    }

    /// Normalize a service-produced descriptor to the local contract.
    ///
    /// Scope must be non-empty, confidence must stay in [0, 1], and
    /// auto-commit eligibility is always re-derived from the type -- the
    /// service cannot widen the safe subset.
    fn normalize(&self, mut descriptor: TaskDescriptor, message: &str) -> TaskDescriptor {
        if descriptor.description.trim().is_empty() {
            descriptor.description = message.to_string();
        }
        descriptor.scope.retain(|path| !path.trim().is_empty());
        if descriptor.scope.is_empty() {
            let fallback = self.heuristic.classify(message);
            descriptor.scope = fallback.scope;
        }
        if descriptor.rules.is_empty() {
            let fallback = self.heuristic.classify(message);
            descriptor.rules = fallback.rules;
        }
        descriptor.auto_commit = descriptor.task_type.auto_commit_safe();
        descriptor.confidence = descriptor.confidence.clamp(0.0, 1.0);
        descriptor
    }
}
