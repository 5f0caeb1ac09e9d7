// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin manager: one owner for everything plugin related.
//!
//! Holds the configuration, the identity resolver, the manifest registry,
//! the settings facade and the loader. There is no process-global plugin
//! state; two managers are fully independent.

use std::path::Path;
use std::sync::Arc;

use modhost_config::ModhostConfig;
use modhost_core::{EntityStore, ModhostError, TranslationRegistrar, ViewRegistrar};
use tokio::sync::RwLock;
use tracing::info;

use crate::bootstrap::{BootstrapLoader, StartFileLoader};
use crate::catalog::{TranslationCatalog, ViewCatalog};
use crate::context::PluginContext;
use crate::identity::IdentityResolver;
use crate::init::run_init_hook;
use crate::loader::{LoadReport, PluginLoader};
use crate::manifest::{Manifest, ManifestRegistry};
use crate::settings::PluginSettings;

/// Builder for [`PluginManager`] with optional collaborator overrides.
///
/// Unset collaborators default to [`ViewCatalog`], [`TranslationCatalog`]
/// and [`StartFileLoader`].
pub struct PluginManagerBuilder {
    config: ModhostConfig,
    store: Arc<dyn EntityStore>,
    views: Option<Arc<dyn ViewRegistrar>>,
    translations: Option<Arc<dyn TranslationRegistrar>>,
    bootstraps: Option<Arc<dyn BootstrapLoader>>,
}

impl PluginManagerBuilder {
    pub fn views(mut self, views: Arc<dyn ViewRegistrar>) -> Self {
        self.views = Some(views);
        self
    }

    pub fn translations(mut self, translations: Arc<dyn TranslationRegistrar>) -> Self {
        self.translations = Some(translations);
        self
    }

    pub fn bootstraps(mut self, bootstraps: Arc<dyn BootstrapLoader>) -> Self {
        self.bootstraps = Some(bootstraps);
        self
    }

    pub fn build(self) -> Result<PluginManager, ModhostError> {
        let resolver = IdentityResolver::new(&self.config.plugins.dir_segment)?;
        let manifests = Arc::new(RwLock::new(ManifestRegistry::new()));
        let settings = PluginSettings::new(self.store.clone());

        let views = self
            .views
            .unwrap_or_else(|| Arc::new(ViewCatalog::new()));
        let translations = self
            .translations
            .unwrap_or_else(|| Arc::new(TranslationCatalog::new()));
        let bootstraps = self
            .bootstraps
            .unwrap_or_else(|| Arc::new(StartFileLoader));

        let loader = PluginLoader::new(
            manifests.clone(),
            settings.clone(),
            bootstraps,
            views,
            translations,
        )
        .with_policy(self.config.plugins.on_load_error);

        Ok(PluginManager {
            config: self.config,
            store: self.store,
            resolver,
            manifests,
            settings,
            loader,
        })
    }
}

/// Owns plugin discovery, manifests and settings for one site.
pub struct PluginManager {
    config: ModhostConfig,
    store: Arc<dyn EntityStore>,
    resolver: IdentityResolver,
    manifests: Arc<RwLock<ManifestRegistry>>,
    settings: PluginSettings,
    loader: PluginLoader,
}

impl PluginManager {
    /// Start building a manager over `store`.
    pub fn builder(config: ModhostConfig, store: Arc<dyn EntityStore>) -> PluginManagerBuilder {
        PluginManagerBuilder {
            config,
            store,
            views: None,
            translations: None,
            bootstraps: None,
        }
    }

    /// A manager with the given view and translation registrars.
    pub fn new(
        config: ModhostConfig,
        store: Arc<dyn EntityStore>,
        views: Arc<dyn ViewRegistrar>,
        translations: Arc<dyn TranslationRegistrar>,
    ) -> Result<Self, ModhostError> {
        Self::builder(config, store)
            .views(views)
            .translations(translations)
            .build()
    }

    pub fn config(&self) -> &ModhostConfig {
        &self.config
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Run the one-time initialization hook against the store.
    pub async fn init(&self) -> Result<(), ModhostError> {
        run_init_hook(self.store.as_ref()).await
    }

    /// Initialize, then load every plugin under the configured root.
    ///
    /// An empty `plugins.path` disables loading and yields an empty report.
    pub async fn boot(&self) -> Result<LoadReport, ModhostError> {
        self.init().await?;

        let root = self.config.plugins.path.as_str();
        if root.is_empty() {
            info!("plugins path is empty, plugin loading disabled");
            return Ok(LoadReport::default());
        }
        self.load_plugins(Path::new(root)).await
    }

    /// Load every plugin under `root` with the configured failure policy.
    pub async fn load_plugins(&self, root: &Path) -> Result<LoadReport, ModhostError> {
        self.loader.load_plugins(root).await
    }

    /// Context for the named plugin.
    pub fn context(&self, plugin: &str) -> PluginContext {
        PluginContext::new(plugin, self.manifests.clone(), self.settings.clone())
    }

    /// Plugin name for `path` under the configured resolution mode.
    pub fn resolve(&self, path: &str) -> Option<String> {
        self.resolver.resolve(path, self.config.plugins.resolution)
    }

    /// Context for the plugin `path` belongs to, if any.
    pub fn context_for(&self, path: &str) -> Option<PluginContext> {
        self.resolve(path).map(|plugin| self.context(&plugin))
    }

    /// Register `manifest` for the plugin found in `frames` (newest first).
    ///
    /// Fails with [`ModhostError::NoPluginContext`] when no frame is a
    /// plugin bootstrap. Returns the plugin name on success.
    pub async fn register_manifest_from<'a, I>(
        &self,
        frames: I,
        manifest: Manifest,
    ) -> Result<String, ModhostError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let plugin = self
            .resolver
            .resolve_call_site(frames)
            .ok_or(ModhostError::NoPluginContext)?;
        self.manifests.write().await.register(&plugin, manifest)?;
        Ok(plugin)
    }

    pub async fn manifest(&self, plugin: &str) -> Option<Manifest> {
        self.manifests.read().await.get(plugin).cloned()
    }

    /// All registered manifests, sorted by plugin name.
    pub async fn manifests(&self) -> Vec<(String, Manifest)> {
        self.manifests
            .read()
            .await
            .list_all()
            .into_iter()
            .map(|(name, manifest)| (name.to_string(), manifest.clone()))
            .collect()
    }

    /// Close the backing store.
    pub async fn shutdown(&self) -> Result<(), ModhostError> {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modhost_config::{LoadErrorPolicy, ResolutionMode};
    use modhost_test_utils::{MemoryEntityStore, PluginTree};

    fn config_for(root: &Path) -> ModhostConfig {
        let mut config = ModhostConfig::default();
        config.plugins.path = root.display().to_string();
        config
    }

    #[tokio::test]
    async fn boot_runs_init_and_loads() {
        let tree = PluginTree::builder()
            .plugin(
                "thewire",
                "[manifest]\nauthor = \"A\"\ndescription = \"D\"\nversion = \"1.0\"\n",
            )
            .build()
            .unwrap();
        let store = Arc::new(MemoryEntityStore::new());
        let manager = PluginManager::builder(config_for(tree.path()), store.clone())
            .build()
            .unwrap();

        let report = manager.boot().await.unwrap();
        assert_eq!(report.loaded_names(), vec!["thewire"]);
        assert_eq!(
            manager.manifest("thewire").await,
            Some(Manifest::basic("A", "D", "1.0"))
        );
        assert!(!store.run_once(crate::init::RUN_ONCE_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn empty_plugins_path_disables_loading() {
        let mut config = ModhostConfig::default();
        config.plugins.path = String::new();
        let manager = PluginManager::builder(config, Arc::new(MemoryEntityStore::new()))
            .build()
            .unwrap();

        let report = manager.boot().await.unwrap();
        assert!(report.loaded.is_empty());
        assert!(manager.manifests().await.is_empty());
    }

    #[tokio::test]
    async fn register_manifest_from_resolves_frames() {
        let manager = PluginManager::builder(
            ModhostConfig::default(),
            Arc::new(MemoryEntityStore::new()),
        )
        .build()
        .unwrap();

        let plugin = manager
            .register_manifest_from(
                ["/var/www/mod/thewire/start.php"],
                Manifest::basic("A", "D", "1.0"),
            )
            .await
            .unwrap();
        assert_eq!(plugin, "thewire");

        let err = manager
            .register_manifest_from(["/var/www/index.php"], Manifest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ModhostError::NoPluginContext));
        assert_eq!(manager.manifests().await.len(), 1);
    }

    #[tokio::test]
    async fn context_for_uses_configured_mode() {
        let mut config = ModhostConfig::default();
        config.plugins.resolution = ResolutionMode::EntryScript;
        let manager = PluginManager::builder(config, Arc::new(MemoryEntityStore::new()))
            .build()
            .unwrap();

        let ctx = manager.context_for("/mod/thewire/everyone.php").unwrap();
        assert_eq!(ctx.name(), "thewire");
        assert!(manager.context_for("/index.php").is_none());
    }

    #[tokio::test]
    async fn policy_comes_from_config() {
        let mut config = ModhostConfig::default();
        config.plugins.on_load_error = LoadErrorPolicy::Skip;
        let manager = PluginManager::builder(config, Arc::new(MemoryEntityStore::new()))
            .build()
            .unwrap();
        assert_eq!(manager.loader.policy(), LoadErrorPolicy::Skip);
    }
}
