// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Renovo change pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Renovo configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values; the
/// binary is runnable with no config file at all.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenovoConfig {
    /// Service identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Task store and message log paths.
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Intent classifier settings.
    #[serde(default)]
    pub intent: IntentConfig,

    /// OpenAI-compatible understanding/transcription service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Remote task-record mirroring settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Workflow driver settings.
    #[serde(default)]
    pub watcher: WatcherConfig,
}

/// Service identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "renovo".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Task store and message log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding active task files; archive lives underneath it.
    #[serde(default = "default_tasks_dir")]
    pub tasks_dir: String,

    /// Path of the bounded message log file.
    #[serde(default = "default_messages_path")]
    pub messages_path: String,

    /// Maximum retained messages; oldest are evicted first.
    #[serde(default = "default_message_cap")]
    pub message_cap: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tasks_dir: default_tasks_dir(),
            messages_path: default_messages_path(),
            message_cap: default_message_cap(),
        }
    }
}

fn default_tasks_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("renovo").join("tasks"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "./tasks".to_string())
}

fn default_messages_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("renovo").join("messages.json"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "./messages.json".to_string())
}

fn default_message_cap() -> usize {
    1000
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Enable the HTTP gateway.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

/// Intent classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntentConfig {
    /// Confidence below this suppresses task creation and asks the sender
    /// to clarify.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Scope file used when no scope keyword matches.
    #[serde(default = "default_scope_file")]
    pub default_scope: String,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            default_scope: default_scope_file(),
        }
    }
}

fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_scope_file() -> String {
    "app/components/Hero.tsx".to_string()
}

/// OpenAI-compatible service configuration.
///
/// `api_key = None` disables the enhanced classification path and voice
/// transcription; the heuristic classifier handles everything locally.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` disables the enhanced path entirely.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model used for intent understanding.
    #[serde(default = "default_understanding_model")]
    pub model: String,

    /// Model used for audio transcription.
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    /// Per-request timeout before falling back to the heuristic path.
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_understanding_model(),
            transcription_model: default_transcription_model(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

fn default_understanding_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_openai_timeout() -> u64 {
    15
}

/// Remote task-record mirroring configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    /// Enable mirroring task records to a GitHub repository.
    #[serde(default)]
    pub enabled: bool,

    /// Repository in `owner/name` form.
    #[serde(default)]
    pub repo: String,

    /// Branch to write to.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// API token. Required when `enabled`.
    #[serde(default)]
    pub token: Option<String>,

    /// Path prefix inside the repository for task record files.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            repo: String::new(),
            branch: default_branch(),
            token: None,
            path_prefix: default_path_prefix(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_path_prefix() -> String {
    "tasks".to_string()
}

/// Workflow driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WatcherConfig {
    /// Enable the workflow driver loop.
    #[serde(default)]
    pub enabled: bool,

    /// Repository the changes are applied to.
    #[serde(default = "default_target_repo")]
    pub target_repo: String,

    /// Seconds between polls for pending tasks.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Command used to open the scoped files in an editor.
    #[serde(default = "default_editor_command")]
    pub editor_command: String,

    /// Master switch for the auto-commit step; per-task eligibility still
    /// applies on top.
    #[serde(default = "default_true")]
    pub auto_commit_enabled: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_repo: default_target_repo(),
            poll_interval_secs: default_poll_interval(),
            editor_command: default_editor_command(),
            auto_commit_enabled: true,
        }
    }
}

fn default_target_repo() -> String {
    ".".to_string()
}

fn default_poll_interval() -> u64 {
    2
}

fn default_editor_command() -> String {
    "code".to_string()
}
