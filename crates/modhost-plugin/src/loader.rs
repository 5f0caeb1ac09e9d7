// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery and loading from a plugins root directory.
//!
//! Every immediate subdirectory of the root is a plugin, named after the
//! directory. Loading a plugin:
//!
//! 1. loads its bootstrap unit through the [`BootstrapLoader`];
//! 2. runs it with a [`PluginContext`] for the plugin;
//! 3. registers `views/default` with the view registrar, if present;
//! 4. registers `languages` with the translation registrar, if present.
//!
//! Directories are processed in name order. Plugins must not depend on it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modhost_config::LoadErrorPolicy;
use modhost_core::{ModhostError, TranslationRegistrar, ViewRegistrar};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::bootstrap::BootstrapLoader;
use crate::context::PluginContext;
use crate::manifest::ManifestRegistry;
use crate::settings::PluginSettings;

/// Directory entries that are never plugins.
pub const IGNORED_ENTRIES: &[&str] = &[".", "..", ".svn", "CVS"];

/// A plugin that loaded successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub path: PathBuf,
    pub has_views: bool,
    pub has_translations: bool,
}

/// Outcome of one load pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<PluginDescriptor>,
    /// `(plugin, reason)` for plugins skipped under [`LoadErrorPolicy::Skip`].
    pub failed: Vec<(String, String)>,
}

impl LoadReport {
    /// Names of loaded plugins, in load order.
    pub fn loaded_names(&self) -> Vec<&str> {
        self.loaded.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Loads every plugin under a root directory.
pub struct PluginLoader {
    manifests: Arc<RwLock<ManifestRegistry>>,
    settings: PluginSettings,
    bootstraps: Arc<dyn BootstrapLoader>,
    views: Arc<dyn ViewRegistrar>,
    translations: Arc<dyn TranslationRegistrar>,
    policy: LoadErrorPolicy,
}

fn into_load_error(plugin: &str, err: ModhostError) -> ModhostError {
    match err {
        ModhostError::PluginLoad { .. } => err,
        other => ModhostError::PluginLoad {
            plugin: plugin.to_string(),
            reason: other.to_string(),
        },
    }
}

impl PluginLoader {
    pub fn new(
        manifests: Arc<RwLock<ManifestRegistry>>,
        settings: PluginSettings,
        bootstraps: Arc<dyn BootstrapLoader>,
        views: Arc<dyn ViewRegistrar>,
        translations: Arc<dyn TranslationRegistrar>,
    ) -> Self {
        Self {
            manifests,
            settings,
            bootstraps,
            views,
            translations,
            policy: LoadErrorPolicy::default(),
        }
    }

    /// Set what happens when a plugin fails to load.
    pub fn with_policy(mut self, policy: LoadErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LoadErrorPolicy {
        self.policy
    }

    /// Plugin directories under `root`, sorted by name.
    ///
    /// Names that are not valid UTF-8 are reported lossily; such plugins
    /// fail in [`load_plugin`](Self::load_plugin).
    pub fn discover(&self, root: &Path) -> Result<Vec<(String, PathBuf)>, ModhostError> {
        let root_error = |source| ModhostError::PluginsRoot {
            path: root.display().to_string(),
            source,
        };

        let mut plugins = Vec::new();
        for entry in std::fs::read_dir(root).map_err(root_error)? {
            let entry = entry.map_err(root_error)?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if IGNORED_ENTRIES.contains(&name.as_str()) || !path.is_dir() {
                continue;
            }
            plugins.push((name, path));
        }
        plugins.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(plugins)
    }

    /// Load every plugin under `root`.
    ///
    /// With [`LoadErrorPolicy::Abort`] the first failure is returned and
    /// later plugins are not attempted. With [`LoadErrorPolicy::Skip`] the
    /// failure is logged and recorded in [`LoadReport::failed`].
    pub async fn load_plugins(&self, root: &Path) -> Result<LoadReport, ModhostError> {
        let mut report = LoadReport::default();

        for (name, dir) in self.discover(root)? {
            match self.load_plugin(&name, &dir).await {
                Ok(descriptor) => {
                    info!(
                        plugin = %descriptor.name,
                        views = descriptor.has_views,
                        translations = descriptor.has_translations,
                        "plugin loaded"
                    );
                    report.loaded.push(descriptor);
                }
                Err(err) => match self.policy {
                    LoadErrorPolicy::Abort => return Err(err),
                    LoadErrorPolicy::Skip => {
                        warn!(plugin = %name, error = %err, "skipping misconfigured plugin");
                        report.failed.push((name, err.to_string()));
                    }
                },
            }
        }

        debug!(
            root = %root.display(),
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "plugin load pass finished"
        );
        Ok(report)
    }

    /// Load a single plugin directory.
    pub async fn load_plugin(
        &self,
        name: &str,
        dir: &Path,
    ) -> Result<PluginDescriptor, ModhostError> {
        if dir.file_name().is_some_and(|n| n.to_str().is_none()) {
            return Err(ModhostError::PluginLoad {
                plugin: name.to_string(),
                reason: "plugin directory name is not valid UTF-8".to_string(),
            });
        }

        let bootstrap = self
            .bootstraps
            .load(name, dir)
            .map_err(|e| into_load_error(name, e))?;

        let ctx = PluginContext::new(name, self.manifests.clone(), self.settings.clone());
        bootstrap
            .start(&ctx)
            .await
            .map_err(|e| into_load_error(name, e))?;

        let views_base = dir.join("views");
        let views_default = views_base.join("default");
        let has_views = views_default.is_dir();
        if has_views {
            self.views
                .register_views("", &views_default, &views_base)
                .map_err(|e| into_load_error(name, e))?;
        }

        let languages = dir.join("languages");
        let has_translations = languages.is_dir();
        if has_translations {
            self.translations
                .register_translations(&languages)
                .map_err(|e| into_load_error(name, e))?;
        }

        Ok(PluginDescriptor {
            name: name.to_string(),
            path: dir.to_path_buf(),
            has_views,
            has_translations,
        })
    }
}
