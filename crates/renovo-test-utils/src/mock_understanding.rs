// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock understanding adapter for deterministic testing.
//!
//! `MockUnderstanding` implements `UnderstandingAdapter` with pre-configured
//! descriptors, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use renovo_core::RenovoError;
use renovo_core::traits::UnderstandingAdapter;
use renovo_core::types::TaskDescriptor;

/// A mock understanding service that returns pre-configured descriptors.
///
/// Descriptors are popped from a FIFO queue. When the queue is empty the
/// adapter errors, which exercises the caller's heuristic fallback.
pub struct MockUnderstanding {
    descriptors: Arc<Mutex<VecDeque<TaskDescriptor>>>,
}

impl MockUnderstanding {
    /// Create a mock with an empty descriptor queue (always errors).
    pub fn new() -> Self {
        Self {
            descriptors: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock pre-loaded with the given descriptors.
    pub fn with_descriptors(descriptors: Vec<TaskDescriptor>) -> Self {
        Self {
            descriptors: Arc::new(Mutex::new(VecDeque::from(descriptors))),
        }
    }

    /// Add a descriptor to the end of the queue.
    pub async fn add_descriptor(&self, descriptor: TaskDescriptor) {
        self.descriptors.lock().await.push_back(descriptor);
    }
}

impl Default for MockUnderstanding {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnderstandingAdapter for MockUnderstanding {
    async fn parse(&self, _message: &str) -> Result<TaskDescriptor, RenovoError> {
        self.descriptors
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| RenovoError::Provider {
                message: "mock understanding queue exhausted".to_string(),
                source: None,
            })
    }
}
