// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-understanding adapter trait for LLM-backed intent parsing.

use async_trait::async_trait;

use crate::error::RenovoError;
use crate::types::TaskDescriptor;

/// Adapter for an external language-understanding service.
///
/// The service receives a raw message and must return the same descriptor
/// shape the heuristic classifier produces. Callers wrap every invocation
/// in a bounded-time, fail-soft adapter -- an error here is never surfaced
/// to the message sender.
#[async_trait]
pub trait UnderstandingAdapter: Send + Sync + 'static {
    /// Parses a natural-language message into a structured descriptor.
    async fn parse(&self, message: &str) -> Result<TaskDescriptor, RenovoError>;
}
