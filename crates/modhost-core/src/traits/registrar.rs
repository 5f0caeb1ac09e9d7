// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View and translation registration hooks called by the plugin loader.

use std::path::Path;

use crate::error::ModhostError;

/// Receives a plugin's `views/default` directory.
pub trait ViewRegistrar: Send + Sync {
    /// Register every view under `views_path`.
    ///
    /// View names are the file paths relative to `views_path` without
    /// extension, prefixed with `prefix`. `base_path` is the plugin's
    /// `views/` directory, the root for other view types.
    fn register_views(
        &self,
        prefix: &str,
        views_path: &Path,
        base_path: &Path,
    ) -> Result<(), ModhostError>;
}

/// Receives a plugin's `languages` directory.
pub trait TranslationRegistrar: Send + Sync {
    /// Register every language file found in `languages_path`.
    fn register_translations(&self, languages_path: &Path) -> Result<(), ModhostError>;
}
