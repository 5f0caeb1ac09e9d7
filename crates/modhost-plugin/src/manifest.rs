// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifests and the registry that holds them.
//!
//! A manifest is descriptive metadata a plugin registers about itself while
//! its bootstrap runs. The registry is keyed by plugin name; registering
//! twice for the same plugin replaces the earlier manifest.

use std::collections::HashMap;

use modhost_core::ModhostError;
use serde::{Deserialize, Serialize};

/// Descriptive metadata for one plugin.
///
/// Every field is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub author: String,
    pub description: String,
    pub version: String,
    pub website: String,
    pub copyright: String,
}

impl Manifest {
    /// A manifest with empty website and copyright.
    pub fn basic(
        author: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            description: description.into(),
            version: version.into(),
            website: String::new(),
            copyright: String::new(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }
}

/// Manifests keyed by plugin name.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    entries: HashMap<String, Manifest>,
}

impl ManifestRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store `manifest` for `plugin`, replacing any earlier registration.
    ///
    /// An empty plugin name means the caller could not be identified and is
    /// rejected with [`ModhostError::NoPluginContext`].
    pub fn register(&mut self, plugin: &str, manifest: Manifest) -> Result<(), ModhostError> {
        if plugin.is_empty() {
            return Err(ModhostError::NoPluginContext);
        }
        self.entries.insert(plugin.to_string(), manifest);
        Ok(())
    }

    /// Get the manifest registered for `plugin`.
    pub fn get(&self, plugin: &str) -> Option<&Manifest> {
        self.entries.get(plugin)
    }

    /// All `(plugin, manifest)` pairs, sorted by plugin name.
    pub fn list_all(&self) -> Vec<(&str, &Manifest)> {
        let mut entries: Vec<(&str, &Manifest)> = self
            .entries
            .iter()
            .map(|(name, manifest)| (name.as_str(), manifest))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Returns the number of registered manifests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no manifests are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ManifestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_manifest_has_empty_optional_fields() {
        let m = Manifest::basic("A", "D", "1.0");
        assert_eq!(m.author, "A");
        assert_eq!(m.description, "D");
        assert_eq!(m.version, "1.0");
        assert_eq!(m.website, "");
        assert_eq!(m.copyright, "");
    }

    #[test]
    fn builders_fill_optional_fields() {
        let m = Manifest::basic("Curverider", "Microblogging", "1.0")
            .with_website("https://example.org")
            .with_copyright("(C) 2008");
        assert_eq!(m.website, "https://example.org");
        assert_eq!(m.copyright, "(C) 2008");
    }

    #[test]
    fn register_and_get_roundtrip() {
        let mut registry = ManifestRegistry::new();
        registry
            .register("thewire", Manifest::basic("A", "D", "1.0"))
            .unwrap();

        let m = registry.get("thewire").unwrap();
        assert_eq!(m, &Manifest::basic("A", "D", "1.0"));
        assert!(registry.get("blog").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = ManifestRegistry::new();
        registry
            .register("thewire", Manifest::basic("A", "D", "1.0"))
            .unwrap();
        registry
            .register("thewire", Manifest::basic("A", "D", "2.0"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("thewire").unwrap().version, "2.0");
    }

    #[test]
    fn empty_plugin_name_is_rejected() {
        let mut registry = ManifestRegistry::new();
        let err = registry
            .register("", Manifest::basic("A", "D", "1.0"))
            .unwrap_err();
        assert!(matches!(err, ModhostError::NoPluginContext));
        assert!(registry.is_empty());
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = ManifestRegistry::default();
        registry.register("zebra", Manifest::default()).unwrap();
        registry.register("alpha", Manifest::default()).unwrap();
        registry.register("middle", Manifest::default()).unwrap();

        let names: Vec<&str> = registry.list_all().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn manifest_toml_defaults_optional_fields() {
        let m: Manifest = toml::from_str(
            r#"
            author = "Curverider"
            description = "Microblogging"
            version = "1.0"
            "#,
        )
        .unwrap();
        assert_eq!(m, Manifest::basic("Curverider", "Microblogging", "1.0"));
    }

    #[test]
    fn manifest_toml_rejects_unknown_fields() {
        let result: Result<Manifest, _> = toml::from_str(
            r#"
            author = "A"
            description = "D"
            version = "1.0"
            licence = "GPL"
            "#,
        );
        assert!(result.is_err());
    }
}
