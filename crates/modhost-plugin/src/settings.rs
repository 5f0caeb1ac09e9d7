// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin settings stored as metadata on a plugin settings record.
//!
//! Each plugin has at most one settings record: an entity of type `object`,
//! subtype `plugin`, whose title is the plugin name. The record is created
//! lazily on the first successful [`PluginSettings::set`].
//!
//! `find` followed by `save` is not transactional. Two concurrent `set` calls
//! for the *same* plugin may lose one update; calls for different plugins
//! touch different records and never interfere.

use std::collections::BTreeMap;
use std::sync::Arc;

use modhost_core::{Entity, EntityStore, EntityType, ModhostError};
use tracing::debug;

/// Subtype of plugin settings records.
pub const PLUGIN_SUBTYPE: &str = "plugin";

/// Metadata name that holds the plugin name; never writable as a setting.
pub const RESERVED_KEY: &str = "title";

/// Settings facade over an [`EntityStore`].
#[derive(Clone)]
pub struct PluginSettings {
    store: Arc<dyn EntityStore>,
}

impl std::fmt::Debug for PluginSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginSettings")
            .field("store", &self.store.name())
            .finish()
    }
}

impl PluginSettings {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// The settings record for `plugin`, if one exists.
    pub async fn find(&self, plugin: &str) -> Result<Option<Entity>, ModhostError> {
        if plugin.is_empty() {
            return Ok(None);
        }
        let records = self
            .store
            .find_entities(EntityType::Object, PLUGIN_SUBTYPE)
            .await?;
        Ok(records.into_iter().find(|record| record.title == plugin))
    }

    /// Value of setting `name` for `plugin`.
    pub async fn get(&self, plugin: &str, name: &str) -> Result<Option<String>, ModhostError> {
        Ok(self
            .find(plugin)
            .await?
            .and_then(|record| record.get(name).map(str::to_string)))
    }

    /// Set `name` to `value` for `plugin`, creating the record if needed.
    ///
    /// Returns `Ok(false)` without touching the store when `name` is the
    /// reserved key or `plugin` is empty.
    pub async fn set(&self, plugin: &str, name: &str, value: &str) -> Result<bool, ModhostError> {
        if name == RESERVED_KEY || plugin.is_empty() {
            return Ok(false);
        }

        let mut record = match self.find(plugin).await? {
            Some(record) => record,
            None => Entity::new(EntityType::Object, PLUGIN_SUBTYPE, plugin),
        };
        record.title = plugin.to_string();
        record.set(name, value);

        let guid = self.store.save(&mut record).await?;
        debug!(plugin, setting = name, %guid, "plugin setting saved");
        Ok(true)
    }

    /// Remove setting `name` for `plugin`.
    ///
    /// Returns `Ok(false)` if the plugin has no settings record or the
    /// setting was not stored.
    pub async fn clear(&self, plugin: &str, name: &str) -> Result<bool, ModhostError> {
        let Some(record) = self.find(plugin).await? else {
            return Ok(false);
        };
        let Some(guid) = record.guid else {
            return Ok(false);
        };
        let removed = self.store.clear_metadata(guid, name).await?;
        debug!(plugin, setting = name, removed, "plugin setting cleared");
        Ok(removed)
    }

    /// Every setting stored for `plugin`.
    pub async fn all(&self, plugin: &str) -> Result<BTreeMap<String, String>, ModhostError> {
        Ok(self
            .find(plugin)
            .await?
            .map(|record| record.metadata)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::run_init_hook;
    use modhost_test_utils::MemoryEntityStore;

    async fn settings() -> (Arc<MemoryEntityStore>, PluginSettings) {
        let store = Arc::new(MemoryEntityStore::new());
        run_init_hook(store.as_ref()).await.unwrap();
        let settings = PluginSettings::new(store.clone());
        (store, settings)
    }

    #[tokio::test]
    async fn find_returns_none_without_record() {
        let (_store, settings) = settings().await;
        assert!(settings.find("thewire").await.unwrap().is_none());
        assert!(settings.get("thewire", "limit").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_creates_record_titled_with_plugin() {
        let (store, settings) = settings().await;
        assert!(settings.set("thewire", "limit", "140").await.unwrap());

        let record = settings.find("thewire").await.unwrap().unwrap();
        assert_eq!(record.title, "thewire");
        assert_eq!(record.subtype, PLUGIN_SUBTYPE);
        assert_eq!(record.entity_type, EntityType::Object);
        assert!(record.is_saved());
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn set_get_clear_roundtrip() {
        let (_store, settings) = settings().await;
        assert!(settings.set("blog", "color", "blue").await.unwrap());
        assert_eq!(
            settings.get("blog", "color").await.unwrap().as_deref(),
            Some("blue")
        );

        assert!(settings.clear("blog", "color").await.unwrap());
        assert!(settings.get("blog", "color").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_set_reuses_the_record() {
        let (store, settings) = settings().await;
        settings.set("blog", "color", "blue").await.unwrap();
        settings.set("blog", "size", "large").await.unwrap();

        assert_eq!(store.all_entities().await.len(), 1);
        let all = settings.all("blog").await.unwrap();
        assert_eq!(all.get("color").map(String::as_str), Some("blue"));
        assert_eq!(all.get("size").map(String::as_str), Some("large"));
    }

    #[tokio::test]
    async fn title_is_never_written() {
        let (store, settings) = settings().await;
        assert!(!settings.set("blog", "title", "x").await.unwrap());
        assert_eq!(store.save_count(), 0);

        settings.set("blog", "color", "blue").await.unwrap();
        assert!(!settings.set("blog", "title", "x").await.unwrap());
        assert_eq!(store.save_count(), 1);
        assert_eq!(settings.find("blog").await.unwrap().unwrap().title, "blog");
    }

    #[tokio::test]
    async fn lookup_matches_title_exactly() {
        let (_store, settings) = settings().await;
        settings.set("blog", "color", "blue").await.unwrap();
        settings.set("blogextended", "color", "red").await.unwrap();

        assert_eq!(
            settings.get("blog", "color").await.unwrap().as_deref(),
            Some("blue")
        );
        assert_eq!(
            settings.get("blogextended", "color").await.unwrap().as_deref(),
            Some("red")
        );
        assert!(settings.find("blo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_without_record_is_false() {
        let (_store, settings) = settings().await;
        assert!(!settings.clear("blog", "color").await.unwrap());
    }

    #[tokio::test]
    async fn clear_of_unset_key_is_false() {
        let (_store, settings) = settings().await;
        settings.set("blog", "color", "blue").await.unwrap();
        assert!(!settings.clear("blog", "limit").await.unwrap());
        assert_eq!(
            settings.get("blog", "color").await.unwrap().as_deref(),
            Some("blue")
        );
    }

    #[tokio::test]
    async fn empty_plugin_name_is_a_no_op() {
        let (store, settings) = settings().await;
        assert!(!settings.set("", "color", "blue").await.unwrap());
        assert!(settings.find("").await.unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn set_fails_when_subtype_unregistered() {
        let store = Arc::new(MemoryEntityStore::new());
        let settings = PluginSettings::new(store);
        let err = settings.set("blog", "color", "blue").await.unwrap_err();
        assert!(matches!(err, ModhostError::Storage { .. }));
    }
}
