// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the modhost plugin host.

use thiserror::Error;

/// The primary error type used across the store, loader and settings APIs.
///
/// Misconfiguration (a broken plugin, a missing plugin context) is an error.
/// Routine data absence (no settings record, no such key) is not: those
/// operations return `Option` or `bool` instead.
#[derive(Debug, Error)]
pub enum ModhostError {
    /// A plugin's bootstrap unit could not be loaded or failed while running.
    #[error("misconfigured plugin `{plugin}`: {reason}")]
    PluginLoad { plugin: String, reason: String },

    /// A plugin-scoped operation was attempted without a resolvable plugin.
    #[error("no plugin context: the calling plugin could not be determined")]
    NoPluginContext,

    /// The plugins root directory could not be read.
    #[error("cannot read plugins directory {path}: {source}")]
    PluginsRoot {
        path: String,
        source: std::io::Error,
    },

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Entity store errors (database connection, query failure, unknown subtype).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModhostError {
    /// Shorthand for a [`ModhostError::Storage`] carrying a plain message.
    pub fn storage(message: impl Into<String>) -> Self {
        ModhostError::Storage {
            source: message.into().into(),
        }
    }
}
