// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenAI-compatible chat and transcription APIs.

use std::str::FromStr;

use renovo_core::types::{TaskDescriptor, TaskType};
use serde::{Deserialize, Serialize};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion response body (the fields we consume).
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Transcription response body.
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// API error response body.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// API error detail.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// The strict structured-output contract for intent parsing.
///
/// The service must answer with exactly this JSON object; `type` arrives
/// as a free string and normalizes to `component_edit` when unknown.
#[derive(Debug, Deserialize)]
pub struct IntentJson {
    #[serde(rename = "type")]
    pub task_type: String,
    pub description: String,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub auto_commit: Option<bool>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl IntentJson {
    /// Converts the wire shape into a descriptor.
    ///
    /// Unknown task types normalize to `component_edit`; auto-commit is
    /// always re-derived downstream, so the wire value is advisory only.
    pub fn into_descriptor(self) -> TaskDescriptor {
        let task_type =
            TaskType::from_str(&self.task_type).unwrap_or(TaskType::ComponentEdit);
        TaskDescriptor {
            task_type,
            description: self.description,
            scope: self.scope,
            rules: self.rules,
            auto_commit: self.auto_commit.unwrap_or_else(|| task_type.auto_commit_safe()),
            confidence: self.confidence.unwrap_or(0.7),
            target_repo: None,
        }
    }
}
