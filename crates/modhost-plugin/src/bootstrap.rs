// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin bootstrap units.
//!
//! A bootstrap runs once per load pass with the plugin's [`PluginContext`].
//! The default unit is the plugin's `start.toml`:
//!
//! ```toml
//! [manifest]
//! author = "Curverider"
//! description = "Microblogging"
//! version = "1.0"
//!
//! [settings]
//! limit = "140"
//! ```
//!
//! `[manifest]` is registered when present. `[settings]` holds defaults that
//! are written only for keys the plugin has no value for yet. Plugins built
//! into the host implement [`Bootstrap`] directly and are supplied through
//! [`CompiledBootstraps`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use modhost_core::ModhostError;
use serde::Deserialize;
use tracing::debug;

use crate::context::PluginContext;
use crate::manifest::Manifest;

/// File name of the default bootstrap unit inside a plugin directory.
pub const START_FILE: &str = "start.toml";

/// A plugin's startup code.
#[async_trait]
pub trait Bootstrap: Send + Sync {
    /// Run the bootstrap on behalf of `ctx.name()`.
    async fn start(&self, ctx: &PluginContext) -> Result<(), ModhostError>;
}

/// Produces the bootstrap unit for a plugin directory.
pub trait BootstrapLoader: Send + Sync {
    fn load(&self, plugin: &str, dir: &Path) -> Result<Arc<dyn Bootstrap>, ModhostError>;
}

/// Parsed `start.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartFile {
    #[serde(default)]
    pub manifest: Option<Manifest>,
    #[serde(default)]
    pub settings: BTreeMap<String, toml::Value>,
}

impl StartFile {
    /// Parse a start file, naming `plugin` in any error.
    pub fn parse(plugin: &str, content: &str) -> Result<Self, ModhostError> {
        toml::from_str(content).map_err(|e| ModhostError::PluginLoad {
            plugin: plugin.to_string(),
            reason: format!("invalid {START_FILE}: {e}"),
        })
    }
}

fn setting_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Bootstrap for StartFile {
    async fn start(&self, ctx: &PluginContext) -> Result<(), ModhostError> {
        if let Some(manifest) = &self.manifest {
            ctx.register_manifest(manifest.clone()).await?;
        }
        for (name, value) in &self.settings {
            if ctx.get_setting(name).await?.is_none() {
                ctx.set_setting(name, &setting_value(value)).await?;
                debug!(plugin = ctx.name(), setting = %name, "applied default setting");
            }
        }
        Ok(())
    }
}

/// Reads `<dir>/start.toml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartFileLoader;

impl BootstrapLoader for StartFileLoader {
    fn load(&self, plugin: &str, dir: &Path) -> Result<Arc<dyn Bootstrap>, ModhostError> {
        let path = dir.join(START_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| ModhostError::PluginLoad {
            plugin: plugin.to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Ok(Arc::new(StartFile::parse(plugin, &content)?))
    }
}

/// Compiled-in bootstraps keyed by plugin name, falling back to `start.toml`.
#[derive(Default)]
pub struct CompiledBootstraps {
    units: HashMap<String, Arc<dyn Bootstrap>>,
    fallback: StartFileLoader,
}

impl CompiledBootstraps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `bootstrap` for the plugin directory named `plugin`.
    pub fn with(mut self, plugin: impl Into<String>, bootstrap: Arc<dyn Bootstrap>) -> Self {
        self.units.insert(plugin.into(), bootstrap);
        self
    }
}

impl BootstrapLoader for CompiledBootstraps {
    fn load(&self, plugin: &str, dir: &Path) -> Result<Arc<dyn Bootstrap>, ModhostError> {
        match self.units.get(plugin) {
            Some(unit) => Ok(Arc::clone(unit)),
            None => self.fallback.load(plugin, dir),
        }
    }
}
