// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every failure instead of stopping at the first one.

use crate::diagnostic::ConfigError;
use crate::model::ModhostConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &ModhostConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.site.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "site.name must not be empty".to_string(),
        });
    }

    let level = config.site.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "site.log_level `{}` is not one of: {}",
                config.site.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let segment = &config.plugins.dir_segment;
    if segment.is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.dir_segment must not be empty".to_string(),
        });
    } else if !segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "plugins.dir_segment `{segment}` must be a single directory name"
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
