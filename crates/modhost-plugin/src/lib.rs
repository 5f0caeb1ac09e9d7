// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, manifest registry and per-plugin settings.
//!
//! A plugins root holds one directory per plugin. Loading a plugin runs its
//! bootstrap unit (`start.toml`, or a compiled [`Bootstrap`]) with an explicit
//! [`PluginContext`] naming the plugin; the bootstrap registers the plugin's
//! manifest and reads or writes its settings through that context. The
//! loader then hands the plugin's `views/default` and `languages`
//! directories to the view and translation registrars.
//!
//! [`PluginManager`] owns all of it: the identity resolver, the manifest
//! registry, the settings facade over an [`EntityStore`](modhost_core::EntityStore)
//! and the loader.

pub mod bootstrap;
pub mod catalog;
pub mod context;
pub mod identity;
pub mod init;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod settings;

pub use bootstrap::{Bootstrap, BootstrapLoader, CompiledBootstraps, StartFile, StartFileLoader};
pub use catalog::{TranslationCatalog, ViewCatalog, ViewLocation};
pub use context::PluginContext;
pub use identity::{normalize_path, IdentityResolver};
pub use init::run_init_hook;
pub use loader::{LoadReport, PluginDescriptor, PluginLoader};
pub use manager::{PluginManager, PluginManagerBuilder};
pub use manifest::{Manifest, ManifestRegistry};
pub use settings::PluginSettings;
