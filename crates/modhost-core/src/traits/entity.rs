// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity store trait for typed objects with string-keyed metadata.

use async_trait::async_trait;

use crate::error::ModhostError;
use crate::types::{Entity, EntityType, Guid};

/// Persistence backend for [`Entity`] records.
///
/// The store performs no locking around read-modify-write sequences made by
/// its callers: two writers that both load, modify and [`save`](Self::save)
/// the same entity can lose an update.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Register `subtype` under `entity_type`, mapped to a class name.
    ///
    /// Idempotent: re-registering keeps a single registration and updates
    /// the class name.
    async fn register_subtype(
        &self,
        entity_type: EntityType,
        subtype: &str,
        class: &str,
    ) -> Result<(), ModhostError>;

    /// The class registered for a subtype, if any.
    async fn subtype_class(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Option<String>, ModhostError>;

    /// All entities of the given type and subtype, ordered by guid.
    async fn find_entities(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Vec<Entity>, ModhostError>;

    /// Insert or fully replace an entity (title and metadata).
    ///
    /// Assigns `entity.guid` on first save. Fails with
    /// [`ModhostError::Storage`] if the subtype is not registered.
    async fn save(&self, entity: &mut Entity) -> Result<Guid, ModhostError>;

    /// Remove one metadata key. Returns `true` if a value was removed.
    async fn clear_metadata(&self, guid: Guid, name: &str) -> Result<bool, ModhostError>;

    /// Whether `key` has already been recorded by [`run_once`](Self::run_once).
    async fn has_run(&self, key: &str) -> Result<bool, ModhostError>;

    /// Record that `key` has run. Returns `true` only the first time.
    async fn run_once(&self, key: &str) -> Result<bool, ModhostError>;

    /// Flush pending writes and release resources.
    async fn close(&self) -> Result<(), ModhostError>;
}
