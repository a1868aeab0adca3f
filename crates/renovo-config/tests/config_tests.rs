// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading, merging, and diagnostics.

use renovo_config::{ConfigError, load_and_validate_str, load_config_from_str};

#[test]
fn empty_config_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.agent.name, "renovo");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8000);
    assert_eq!(config.store.message_cap, 1000);
    assert_eq!(config.intent.confidence_threshold, 0.5);
    assert_eq!(config.intent.default_scope, "app/components/Hero.tsx");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.github.branch, "main");
    assert_eq!(config.watcher.poll_interval_secs, 2);
}

#[test]
fn full_config_round_trips() {
    let toml = r#"
[agent]
name = "renovo-prod"
log_level = "debug"

[store]
tasks_dir = "/srv/renovo/tasks"
messages_path = "/srv/renovo/messages.json"
message_cap = 500

[gateway]
enabled = true
host = "0.0.0.0"
port = 9000

[intent]
confidence_threshold = 0.6
default_scope = "src/components/Hero.tsx"

[openai]
api_key = "sk-test"
model = "gpt-4o"
timeout_secs = 30

[github]
enabled = true
repo = "acme/site"
token = "ghp_test"
path_prefix = "change-requests"

[watcher]
enabled = true
target_repo = "/srv/site"
poll_interval_secs = 5
editor_command = "codium"
auto_commit_enabled = false
"#;
    let config = load_and_validate_str(toml).unwrap();
    assert_eq!(config.agent.name, "renovo-prod");
    assert_eq!(config.store.message_cap, 500);
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.intent.confidence_threshold, 0.6);
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.github.path_prefix, "change-requests");
    assert!(config.watcher.enabled);
    assert!(!config.watcher.auto_commit_enabled);
}

#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[agent]
naem = "typo"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let has_suggestion = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "naem" && suggestion.as_deref() == Some("name")
        )
    });
    assert!(has_suggestion, "expected a `name` suggestion, got: {errors:?}");
}

#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_and_validate_str(toml).is_err());
}

#[test]
fn wrong_type_is_a_diagnostic_not_a_panic() {
    let toml = r#"
[gateway]
port = "not-a-number"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
}

#[test]
fn validation_runs_after_successful_parse() {
    let toml = r#"
[intent]
confidence_threshold = 2.0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("confidence_threshold"))
    }));
}

#[test]
fn github_enabled_needs_repo_and_token() {
    let toml = r#"
[github]
enabled = true
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.len() >= 2, "expected repo and token errors, got: {errors:?}");
}

#[test]
fn partial_section_keeps_other_defaults() {
    let toml = r#"
[gateway]
port = 3000
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.gateway.port, 3000);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert!(config.gateway.enabled);
}
