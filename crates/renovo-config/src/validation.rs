// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and cross-field requirements.

use crate::diagnostic::ConfigError;
use crate::model::RenovoConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RenovoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.store.tasks_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.tasks_dir must not be empty".to_string(),
        });
    }

    if config.store.messages_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.messages_path must not be empty".to_string(),
        });
    }

    if config.store.message_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "store.message_cap must be at least 1".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&config.intent.confidence_threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "intent.confidence_threshold must be in [0, 1], got {}",
                config.intent.confidence_threshold
            ),
        });
    }

    if config.intent.default_scope.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "intent.default_scope must not be empty".to_string(),
        });
    }

    if config.github.enabled {
        if config.github.repo.trim().is_empty() || !config.github.repo.contains('/') {
            errors.push(ConfigError::Validation {
                message: format!(
                    "github.repo must be `owner/name` when github.enabled, got `{}`",
                    config.github.repo
                ),
            });
        }
        if config.github.token.is_none() {
            errors.push(ConfigError::Validation {
                message: "github.token is required when github.enabled".to_string(),
            });
        }
    }

    if config.watcher.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "watcher.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RenovoConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_tasks_dir_fails_validation() {
        let mut config = RenovoConfig::default();
        config.store.tasks_dir = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("tasks_dir"))
        ));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = RenovoConfig::default();
        config.intent.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("confidence_threshold"))
        ));
    }

    #[test]
    fn github_enabled_requires_repo_and_token() {
        let mut config = RenovoConfig::default();
        config.github.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("github.repo"))
        ));
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("github.token"))
        ));
    }

    #[test]
    fn github_enabled_with_repo_and_token_passes() {
        let mut config = RenovoConfig::default();
        config.github.enabled = true;
        config.github.repo = "acme/site".to_string();
        config.github.token = Some("ghp_test".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_message_cap_fails_validation() {
        let mut config = RenovoConfig::default();
        config.store.message_cap = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("message_cap"))
        ));
    }
}
