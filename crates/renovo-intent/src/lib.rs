// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification for the Renovo change pipeline.
//!
//! Two variants behind one surface: the deterministic keyword
//! [`IntentClassifier`], and the [`EnhancedClassifier`] that delegates to an
//! external understanding service and falls back to the heuristic on any
//! failure.

pub mod classifier;
pub mod enhanced;
pub mod selector;

pub use classifier::IntentClassifier;
pub use enhanced::EnhancedClassifier;
pub use selector::Classifier;
