// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`EntityStore`] trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use modhost_config::model::StorageConfig;
use modhost_core::{Entity, EntityStore, EntityType, Guid, ModhostError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed entity store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened on the first call to [`SqliteEntityStore::initialize`].
pub struct SqliteEntityStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteEntityStore {
    /// Create a store for the configured database. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), ModhostError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| ModhostError::storage("entity store already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite entity store initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, ModhostError> {
        self.db.get().ok_or_else(|| {
            ModhostError::storage("entity store not initialized -- call initialize() first")
        })
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn register_subtype(
        &self,
        entity_type: EntityType,
        subtype: &str,
        class: &str,
    ) -> Result<(), ModhostError> {
        queries::subtypes::register_subtype(self.db()?, entity_type, subtype, class).await
    }

    async fn subtype_class(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Option<String>, ModhostError> {
        queries::subtypes::subtype_class(self.db()?, entity_type, subtype).await
    }

    async fn find_entities(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Vec<Entity>, ModhostError> {
        queries::entities::find_entities(self.db()?, entity_type, subtype).await
    }

    async fn save(&self, entity: &mut Entity) -> Result<Guid, ModhostError> {
        queries::entities::save_entity(self.db()?, entity).await
    }

    async fn clear_metadata(&self, guid: Guid, name: &str) -> Result<bool, ModhostError> {
        queries::entities::clear_metadata(self.db()?, guid, name).await
    }

    async fn has_run(&self, key: &str) -> Result<bool, ModhostError> {
        queries::markers::has_run(self.db()?, key).await
    }

    async fn run_once(&self, key: &str) -> Result<bool, ModhostError> {
        queries::markers::run_once(self.db()?, key).await
    }

    async fn close(&self) -> Result<(), ModhostError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
