// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit plugin context handed to bootstraps and plugin code.

use std::collections::BTreeMap;
use std::sync::Arc;

use modhost_core::{Entity, ModhostError};
use tokio::sync::RwLock;
use tracing::debug;

use crate::manifest::{Manifest, ManifestRegistry};
use crate::settings::PluginSettings;

/// Names the plugin on whose behalf manifest and settings calls are made.
#[derive(Debug, Clone)]
pub struct PluginContext {
    name: String,
    manifests: Arc<RwLock<ManifestRegistry>>,
    settings: PluginSettings,
}

impl PluginContext {
    pub fn new(
        name: impl Into<String>,
        manifests: Arc<RwLock<ManifestRegistry>>,
        settings: PluginSettings,
    ) -> Self {
        Self {
            name: name.into(),
            manifests,
            settings,
        }
    }

    /// The plugin this context belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register (or replace) this plugin's manifest.
    pub async fn register_manifest(&self, manifest: Manifest) -> Result<(), ModhostError> {
        debug!(plugin = %self.name, version = %manifest.version, "registering manifest");
        self.manifests.write().await.register(&self.name, manifest)
    }

    /// Register a manifest with empty website and copyright.
    pub async fn register_manifest_basic(
        &self,
        author: &str,
        description: &str,
        version: &str,
    ) -> Result<(), ModhostError> {
        self.register_manifest(Manifest::basic(author, description, version))
            .await
    }

    /// This plugin's registered manifest, if any.
    pub async fn manifest(&self) -> Option<Manifest> {
        self.manifests.read().await.get(&self.name).cloned()
    }

    pub async fn find_settings(&self) -> Result<Option<Entity>, ModhostError> {
        self.settings.find(&self.name).await
    }

    pub async fn get_setting(&self, name: &str) -> Result<Option<String>, ModhostError> {
        self.settings.get(&self.name, name).await
    }

    pub async fn set_setting(&self, name: &str, value: &str) -> Result<bool, ModhostError> {
        self.settings.set(&self.name, name, value).await
    }

    pub async fn clear_setting(&self, name: &str) -> Result<bool, ModhostError> {
        self.settings.clear(&self.name, name).await
    }

    pub async fn all_settings(&self) -> Result<BTreeMap<String, String>, ModhostError> {
        self.settings.all(&self.name).await
    }
}
