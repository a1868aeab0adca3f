// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GitHub contents-API implementation of [`RemoteTaskWriter`].
//!
//! Mirrors each task record as a JSON file in a configured repository.
//! When mirroring is disabled, [`NoopTaskWriter`] is selected at
//! construction time so callers keep a single code path.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use renovo_core::RenovoError;
use renovo_core::traits::RemoteTaskWriter;
use renovo_core::types::Task;
use tracing::{debug, info};

/// Base URL for the GitHub REST API.
const API_BASE_URL: &str = "https://api.github.com";

/// [`RemoteTaskWriter`] that PUTs task records through the contents API.
pub struct GitHubTaskWriter {
    client: reqwest::Client,
    repo: String,
    branch: String,
    path_prefix: String,
    base_url: String,
}

impl GitHubTaskWriter {
    /// Creates a writer for `owner/name` on `branch`.
    pub fn new(
        repo: String,
        branch: String,
        token: &str,
        path_prefix: String,
    ) -> Result<Self, RenovoError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "authorization",
            reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| RenovoError::Config(format!("invalid token header value: {e}")))?,
        );
        headers.insert(
            "accept",
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "user-agent",
            reqwest::header::HeaderValue::from_static("renovo"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| RenovoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            repo,
            branch,
            path_prefix,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn contents_url(&self, task_id: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}/CHANGE-{}.json",
            self.base_url, self.repo, self.path_prefix, task_id
        )
    }
}

#[async_trait]
impl RemoteTaskWriter for GitHubTaskWriter {
    async fn put_task(&self, task: &Task) -> Result<(), RenovoError> {
        let record = serde_json::to_string_pretty(task).map_err(|e| RenovoError::Provider {
            message: format!("failed to serialize task record: {e}"),
            source: Some(Box::new(e)),
        })?;

        let body = serde_json::json!({
            "message": format!("task: {} ({})", task.id, task.task_type),
            "content": BASE64.encode(record),
            "branch": self.branch,
        });

        let response = self
            .client
            .put(self.contents_url(&task.id))
            .json(&body)
            .send()
            .await
            .map_err(|e| RenovoError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenovoError::Provider {
                message: format!("GitHub API returned {status}: {body}"),
                source: None,
            });
        }

        info!(task_id = %task.id, repo = %self.repo, "task record mirrored");
        Ok(())
    }
}

/// No-op writer selected when mirroring is unconfigured.
pub struct NoopTaskWriter;

#[async_trait]
impl RemoteTaskWriter for NoopTaskWriter {
    async fn put_task(&self, task: &Task) -> Result<(), RenovoError> {
        debug!(task_id = %task.id, "remote mirroring disabled, record kept local only");
        Ok(())
    }
}

/// Builds the writer capability from the `[github]` config section.
///
/// `None` means mirroring is off entirely -- callers may then skip
/// attaching any writer rather than carrying the no-op.
pub fn from_config(
    config: &renovo_config::model::GithubConfig,
) -> Result<Option<GitHubTaskWriter>, RenovoError> {
    if !config.enabled {
        return Ok(None);
    }
    let token = config.token.as_deref().ok_or_else(|| {
        RenovoError::Config("github.token is required when github.enabled".to_string())
    })?;
    let writer = GitHubTaskWriter::new(
        config.repo.clone(),
        config.branch.clone(),
        token,
        config.path_prefix.clone(),
    )?;
    Ok(Some(writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use renovo_core::types::{TaskSource, TaskStatus, TaskType};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_task() -> Task {
        Task {
            id: "abc12345".into(),
            task_type: TaskType::CopyChange,
            description: "change hero text".into(),
            scope: vec!["app/components/Hero.tsx".into()],
            rules: vec![],
            auto_commit: true,
            status: TaskStatus::Pending,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: None,
            source: TaskSource {
                message: "m".into(),
                sender: "s".into(),
                timestamp: "2026-01-01T00:00:00Z".into(),
            },
            result: None,
        }
    }

    fn writer(base_url: &str) -> GitHubTaskWriter {
        GitHubTaskWriter::new(
            "acme/site".into(),
            "main".into(),
            "ghp_test",
            "tasks".into(),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn put_task_sends_base64_record_to_contents_api() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/repos/acme/site/contents/tasks/CHANGE-abc12345.json"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(body_partial_json(serde_json::json!({"branch": "main"})))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        writer(&server.uri()).put_task(&sample_task()).await.unwrap();
    }

    #[tokio::test]
    async fn put_task_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/repos/acme/site/contents/tasks/CHANGE-abc12345.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = writer(&server.uri()).put_task(&sample_task()).await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn noop_writer_always_succeeds() {
        NoopTaskWriter.put_task(&sample_task()).await.unwrap();
    }

    #[test]
    fn from_config_disabled_is_none() {
        let config = renovo_config::model::GithubConfig::default();
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn from_config_enabled_without_token_is_an_error() {
        let config = renovo_config::model::GithubConfig {
            enabled: true,
            repo: "acme/site".into(),
            ..Default::default()
        };
        assert!(from_config(&config).is_err());
    }
}
