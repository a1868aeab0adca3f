// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction-time selection between the heuristic and enhanced paths.

use crate::classifier::IntentClassifier;
use crate::enhanced::EnhancedClassifier;
use renovo_core::types::TaskDescriptor;

/// The classifier capability handed to message consumers.
///
/// Selected once at process start: `Enhanced` when an understanding
/// service is configured, `Heuristic` otherwise. Consumers call
/// [`Classifier::classify`] without branching on availability.
pub enum Classifier {
    /// Local keyword rules only.
    Heuristic(IntentClassifier),
    /// External understanding service with heuristic fallback.
    Enhanced(EnhancedClassifier),
}

impl Classifier {
    /// Classify a message. Never fails on either path.
    pub async fn classify(&self, message: &str) -> TaskDescriptor {
        match self {
            Classifier::Heuristic(c) => c.classify(message),
            Classifier::Enhanced(c) => c.classify(message).await,
        }
    }

    /// The confidence below which task creation should be suppressed.
    pub fn confidence_threshold(&self) -> f32 {
        match self {
            Classifier::Heuristic(c) => c.confidence_threshold(),
            Classifier::Enhanced(c) => c.confidence_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_core::types::TaskType;

    #[tokio::test]
    async fn heuristic_variant_classifies_without_await_points() {
        let c = Classifier::Heuristic(IntentClassifier::default());
        let d = c.classify("change the button text on the cta").await;
        assert_eq!(d.task_type, TaskType::CopyChange);
        assert_eq!(c.confidence_threshold(), 0.5);
    }
}
