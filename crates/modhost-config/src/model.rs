// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the modhost plugin host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level modhost configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModhostConfig {
    /// Site identity and logging.
    #[serde(default)]
    pub site: SiteConfig,

    /// Plugin discovery and loading.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Entity store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Site identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name of the site.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_site_name() -> String {
    "modhost".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How the current plugin is inferred when only a path is known.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResolutionMode {
    /// Match `<segment>/<plugin>/start.<ext>` at the end of a source path.
    #[default]
    CallSite,
    /// Match `<segment>/<plugin>/` anywhere in the request's entry script.
    EntryScript,
}

/// What a load pass does when one plugin fails to bootstrap.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadErrorPolicy {
    /// Stop the pass and return the first failure.
    #[default]
    Abort,
    /// Log the failure, leave the plugin inactive and continue.
    Skip,
}

/// Plugin discovery and loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Root directory holding one sub-directory per plugin.
    /// An empty path disables plugin loading.
    #[serde(default = "default_plugins_path")]
    pub path: String,

    /// Directory segment that marks plugin paths during name resolution.
    #[serde(default = "default_dir_segment")]
    pub dir_segment: String,

    /// Resolution mode used when a context is derived from a path.
    #[serde(default)]
    pub resolution: ResolutionMode,

    /// Behavior when a plugin fails to load.
    #[serde(default)]
    pub on_load_error: LoadErrorPolicy,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            path: default_plugins_path(),
            dir_segment: default_dir_segment(),
            resolution: ResolutionMode::default(),
            on_load_error: LoadErrorPolicy::default(),
        }
    }
}

fn default_plugins_path() -> String {
    "mod".to_string()
}

fn default_dir_segment() -> String {
    "mod".to_string()
}

/// Entity store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("modhost/modhost.db").display().to_string())
        .unwrap_or_else(|| "modhost.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ModhostConfig::default();
        assert_eq!(config.site.name, "modhost");
        assert_eq!(config.site.log_level, "info");
        assert_eq!(config.plugins.dir_segment, "mod");
        assert_eq!(config.plugins.resolution, ResolutionMode::CallSite);
        assert_eq!(config.plugins.on_load_error, LoadErrorPolicy::Abort);
        assert!(config.storage.wal_mode);
        assert!(config.storage.database_path.ends_with("modhost.db"));
    }

    #[test]
    fn enums_parse_snake_case() {
        let config: ModhostConfig = toml::from_str(
            r#"
[plugins]
resolution = "entry_script"
on_load_error = "skip"
"#,
        )
        .unwrap();
        assert_eq!(config.plugins.resolution, ResolutionMode::EntryScript);
        assert_eq!(config.plugins.on_load_error, LoadErrorPolicy::Skip);
        assert_eq!(ResolutionMode::EntryScript.to_string(), "entry_script");
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = toml::from_str::<ModhostConfig>("[plugins]\non_load_error = \"retry\"\n");
        assert!(result.is_err());
    }
}
