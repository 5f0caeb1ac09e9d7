// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process view and translation catalogs.
//!
//! These are the default registrars handed to the loader. Both keep the
//! last registration for a name, so a plugin loaded later overrides views
//! and translation keys of plugins loaded before it.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use modhost_core::{ModhostError, TranslationRegistrar, ViewRegistrar};
use tracing::debug;
use walkdir::WalkDir;

/// Where a registered view lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLocation {
    /// The `views/` directory the view was registered from.
    pub base_path: PathBuf,
    /// The view file itself.
    pub file: PathBuf,
}

/// View name to file mapping built by walking plugin view directories.
#[derive(Debug, Default)]
pub struct ViewCatalog {
    views: RwLock<BTreeMap<String, ViewLocation>>,
}

impl ViewCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of view `name`.
    pub fn view(&self, name: &str) -> Option<ViewLocation> {
        self.views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// All registered view names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.views.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `a/b/c.php` relative to `root` becomes `a/b/c`.
fn view_name(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

impl ViewRegistrar for ViewCatalog {
    fn register_views(
        &self,
        prefix: &str,
        views_path: &Path,
        base_path: &Path,
    ) -> Result<(), ModhostError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(views_path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ModhostError::Internal(format!(
                    "cannot scan views in {}: {e}",
                    views_path.display()
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = view_name(views_path, entry.path()) {
                found.push((format!("{prefix}{name}"), entry.into_path()));
            }
        }

        let count = found.len();
        let mut views = self.views.write().unwrap_or_else(PoisonError::into_inner);
        for (name, file) in found {
            views.insert(
                name,
                ViewLocation {
                    base_path: base_path.to_path_buf(),
                    file,
                },
            );
        }
        debug!(path = %views_path.display(), count, "registered views");
        Ok(())
    }
}

/// Per-language translation tables merged from plugin `languages/` dirs.
#[derive(Debug, Default)]
pub struct TranslationCatalog {
    languages: RwLock<BTreeMap<String, HashMap<String, String>>>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translation of `key` in `lang`.
    pub fn translate(&self, lang: &str, key: &str) -> Option<String> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(lang)
            .and_then(|table| table.get(key))
            .cloned()
    }

    /// Languages with at least one registered table, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl TranslationRegistrar for TranslationCatalog {
    fn register_translations(&self, languages_path: &Path) -> Result<(), ModhostError> {
        let mut tables = Vec::new();
        for entry in WalkDir::new(languages_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                ModhostError::Internal(format!(
                    "cannot scan languages in {}: {e}",
                    languages_path.display()
                ))
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("toml")
            {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = std::fs::read_to_string(path).map_err(|e| {
                ModhostError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            let table: HashMap<String, String> = toml::from_str(&content).map_err(|e| {
                ModhostError::Config(format!("invalid language file {}: {e}", path.display()))
            })?;
            tables.push((lang.to_string(), table));
        }

        let mut languages = self.languages.write().unwrap_or_else(PoisonError::into_inner);
        for (lang, table) in tables {
            debug!(lang = %lang, keys = table.len(), "registered translations");
            languages.entry(lang).or_default().extend(table);
        }
        Ok(())
    }
}
