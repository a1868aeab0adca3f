// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible collaborator clients for the Renovo change pipeline.
//!
//! Implements [`UnderstandingAdapter`] (chat completion with a strict
//! structured-output contract) and [`TranscriptionAdapter`] (audio
//! transcription) over one HTTP client. Both are optional capabilities:
//! without an API key the binary never constructs this crate's service.

pub mod client;
pub mod types;

pub use client::OpenAiClient;

use std::time::Duration;

use async_trait::async_trait;
use renovo_core::RenovoError;
use renovo_core::traits::{TranscriptionAdapter, UnderstandingAdapter};
use renovo_core::types::TaskDescriptor;
use tracing::debug;

use crate::types::IntentJson;

/// System prompt for the intent-parsing structured-output contract.
const INTENT_SYSTEM_PROMPT: &str = "\
You are an intent parser for a website change automation system.

Analyze the user's message and extract the type of change, a clear
description, the files to modify, and safety rules.

Available task types: copy_change, section_reorder, color_change,
seo_update, component_edit, style_change, add_content, remove_content.

Common file locations:
- Hero section: app/components/Hero.tsx
- Header: app/components/Header.tsx
- Footer: app/components/Footer.tsx
- CTA buttons: app/components/CTA.tsx
- SEO: app/layout.tsx
- Colors: tailwind.config.js

Respond ONLY with a valid JSON object (no markdown, no explanation):
{
    \"type\": \"task_type\",
    \"description\": \"Clear description of what to change\",
    \"scope\": [\"file1.tsx\"],
    \"rules\": [\"Rule 1\"],
    \"auto_commit\": true,
    \"confidence\": 0.0
}

If the message is unclear or not a valid change request, set confidence
below 0.5.";

/// Understanding and transcription service over an OpenAI-compatible API.
pub struct OpenAiService {
    client: OpenAiClient,
}

impl OpenAiService {
    /// Builds the service from the `[openai]` config section.
    ///
    /// Returns `None` when no API key is configured -- the caller then
    /// selects the heuristic-only path.
    pub fn from_config(
        config: &renovo_config::model::OpenAiConfig,
    ) -> Result<Option<Self>, RenovoError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };
        let client = OpenAiClient::new(
            api_key,
            config.model.clone(),
            config.transcription_model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Some(Self { client }))
    }

    /// Wraps an existing client (used by tests).
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UnderstandingAdapter for OpenAiService {
    async fn parse(&self, message: &str) -> Result<TaskDescriptor, RenovoError> {
        let content = self.client.chat(INTENT_SYSTEM_PROMPT, message).await?;
        let stripped = strip_code_fences(&content);
        let intent: IntentJson =
            serde_json::from_str(stripped).map_err(|e| RenovoError::Provider {
                message: format!("understanding service returned unparsable output: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(task_type = %intent.task_type, "intent parsed by understanding service");
        Ok(intent.into_descriptor())
    }
}

#[async_trait]
impl TranscriptionAdapter for OpenAiService {
    async fn transcribe(&self, media_url: &str) -> Result<String, RenovoError> {
        self.client.transcribe_url(media_url).await
    }
}

/// Strips a surrounding markdown code fence (with optional `json` tag).
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_core::types::TaskType;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(base_url: &str) -> OpenAiService {
        let client = OpenAiClient::new(
            "test-key",
            "gpt-4o-mini".into(),
            "whisper-1".into(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        OpenAiService::with_client(client)
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    #[test]
    fn strip_code_fences_handles_all_shapes() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[tokio::test]
    async fn parse_returns_descriptor_for_valid_json() {
        let server = MockServer::start().await;
        let intent = r#"{"type": "copy_change", "description": "change hero text",
                         "scope": ["app/components/Hero.tsx"], "rules": [],
                         "auto_commit": true, "confidence": 0.9}"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(intent)))
            .mount(&server)
            .await;

        let d = service(&server.uri())
            .parse("change the hero text")
            .await
            .unwrap();
        assert_eq!(d.task_type, TaskType::CopyChange);
        assert_eq!(d.scope, vec!["app/components/Hero.tsx"]);
    }

    #[tokio::test]
    async fn parse_accepts_fenced_json() {
        let server = MockServer::start().await;
        let fenced = "```json\n{\"type\": \"seo_update\", \"description\": \"fix meta\"}\n```";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(fenced)))
            .mount(&server)
            .await;

        let d = service(&server.uri()).parse("fix the meta tags").await.unwrap();
        assert_eq!(d.task_type, TaskType::SeoUpdate);
    }

    #[tokio::test]
    async fn parse_rejects_garbage_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("I think you want...")),
            )
            .mount(&server)
            .await;

        let err = service(&server.uri()).parse("do something").await.unwrap_err();
        assert!(err.to_string().contains("unparsable"));
    }

    #[test]
    fn from_config_is_none_without_api_key() {
        let config = renovo_config::model::OpenAiConfig::default();
        assert!(OpenAiService::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn from_config_builds_with_api_key() {
        let config = renovo_config::model::OpenAiConfig {
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        assert!(OpenAiService::from_config(&config).unwrap().is_some());
    }
}
