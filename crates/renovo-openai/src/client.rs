// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and transient error retry for the chat-completion and
//! audio-transcription endpoints.

use std::time::Duration;

use renovo_core::RenovoError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse, TranscriptionResponse};

/// Base URL for the OpenAI API.
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Token budget for intent parsing completions.
const MAX_COMPLETION_TOKENS: u32 = 500;

/// HTTP client for OpenAI-compatible API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 5xx).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    transcription_model: String,
    max_retries: u32,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - API key for bearer authentication
    /// * `model` - Chat model for intent understanding
    /// * `transcription_model` - Model for audio transcription
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: &str,
        model: String,
        transcription_model: String,
        timeout: Duration,
    ) -> Result<Self, RenovoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                RenovoError::Config(format!("invalid API key header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RenovoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            transcription_model,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat completion with a system and a user message and
    /// returns the assistant content.
    ///
    /// On transient errors (429, 5xx), retries once after a 1-second delay.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, RenovoError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.1,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying chat request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| RenovoError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "chat response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| RenovoError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let chat: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| RenovoError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return chat
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or_else(|| RenovoError::Provider {
                        message: "API response contained no choices".to_string(),
                        source: None,
                    });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(RenovoError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            return Err(api_error(status, response.text().await.unwrap_or_default()));
        }

        Err(last_error.unwrap_or_else(|| RenovoError::Provider {
            message: "chat request failed after retries".into(),
            source: None,
        }))
    }

    /// Downloads the referenced media and submits it for transcription.
    pub async fn transcribe_url(&self, media_url: &str) -> Result<String, RenovoError> {
        let media = self
            .client
            .get(media_url)
            .send()
            .await
            .map_err(|e| RenovoError::Provider {
                message: format!("failed to download media: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !media.status().is_success() {
            return Err(RenovoError::Provider {
                message: format!("media download returned {}", media.status()),
                source: None,
            });
        }

        let bytes = media.bytes().await.map_err(|e| RenovoError::Provider {
            message: format!("failed to read media body: {e}"),
            source: Some(Box::new(e)),
        })?;

        self.transcribe_bytes(bytes.to_vec()).await
    }

    /// Submits raw audio bytes to the transcription endpoint.
    pub async fn transcribe_bytes(&self, audio: Vec<u8>) -> Result<String, RenovoError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let part = reqwest::multipart::Part::bytes(audio).file_name("audio.ogg");
        let form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RenovoError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "transcription response received");

        if !status.is_success() {
            return Err(api_error(status, response.text().await.unwrap_or_default()));
        }

        let body = response.text().await.map_err(|e| RenovoError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let transcription: TranscriptionResponse =
            serde_json::from_str(&body).map_err(|e| RenovoError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(transcription.text)
    }
}

/// Builds a provider error from a non-success API response.
fn api_error(status: reqwest::StatusCode, body: String) -> RenovoError {
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
        format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_, api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    };
    RenovoError::Provider {
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    status.as_u16() == 429 || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(
            "test-api-key",
            "gpt-4o-mini".into(),
            "whisper-1".into(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("parsed!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let content = client.chat("system", "user").await.unwrap();
        assert_eq!(content, "parsed!");
    }

    #[tokio::test]
    async fn chat_retries_once_on_429() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("after retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let content = client.chat("system", "user").await.unwrap();
        assert_eq!(content, "after retry");
    }

    #[tokio::test]
    async fn chat_fails_on_400_without_retry() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Bad model"}
        });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_exhausts_retries_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.chat("system", "user").await.is_err());
    }

    #[tokio::test]
    async fn chat_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn transcribe_bytes_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"text": "change the hero text"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let text = client.transcribe_bytes(vec![1, 2, 3]).await.unwrap();
        assert_eq!(text, "change the hero text");
    }

    #[tokio::test]
    async fn transcribe_url_downloads_then_submits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/note.ogg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 16]))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"text": "voice note text"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let url = format!("{}/media/note.ogg", server.uri());
        let text = client.transcribe_url(&url).await.unwrap();
        assert_eq!(text, "voice note text");
    }

    #[tokio::test]
    async fn transcribe_url_fails_on_missing_media() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/gone.ogg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let url = format!("{}/media/gone.ogg", server.uri());
        assert!(client.transcribe_url(&url).await.is_err());
    }
}
