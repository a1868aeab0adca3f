// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Renovo integration tests.
//!
//! Provides mock implementations of the capability traits and a
//! [`TestHarness`] that assembles a full pipeline over temp storage.

pub mod harness;
pub mod mock_agent;
pub mod mock_understanding;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_agent::{MockChangeAgent, MockTranscriber};
pub use mock_understanding::MockUnderstanding;
