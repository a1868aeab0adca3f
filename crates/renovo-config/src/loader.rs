// SPDX-FileCopyrightText: 2026 Renovo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./renovo.toml` > `~/.config/renovo/renovo.toml` > `/etc/renovo/renovo.toml`
//! with environment variable overrides via `RENOVO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RenovoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/renovo/renovo.toml` (system-wide)
/// 3. `~/.config/renovo/renovo.toml` (user XDG config)
/// 4. `./renovo.toml` (local directory)
/// 5. `RENOVO_*` environment variables
pub fn load_config() -> Result<RenovoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovoConfig::default()))
        .merge(Toml::file("/etc/renovo/renovo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("renovo/renovo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("renovo.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RenovoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RenovoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RenovoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `RENOVO_OPENAI_API_KEY` must
/// map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("RENOVO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: RENOVO_GATEWAY_PORT -> "gateway_port"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("store_", "store.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("intent_", "intent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("github_", "github.", 1)
            .replacen("watcher_", "watcher.", 1);
        mapped.into()
    })
}
