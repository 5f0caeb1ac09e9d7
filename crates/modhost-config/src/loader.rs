// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./modhost.toml` > `~/.config/modhost/modhost.toml` > `/etc/modhost/modhost.toml`
//! with environment variable overrides via the `MODHOST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ModhostConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/modhost/modhost.toml`
/// 3. `~/.config/modhost/modhost.toml`
/// 4. `./modhost.toml`
/// 5. `MODHOST_*` environment variables
pub fn load_config() -> Result<ModhostConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ModhostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModhostConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ModhostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModhostConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ModhostConfig::default()))
        .merge(Toml::file("/etc/modhost/modhost.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("modhost/modhost.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("modhost.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `MODHOST_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys such as
/// `database_path` and `on_load_error` contain underscores.
fn env_provider() -> Env {
    Env::prefixed("MODHOST_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("site_", "site.", 1)
            .replacen("plugins_", "plugins.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
