// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`EntityStore`] with the same contract as the SQLite store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use modhost_core::{Entity, EntityStore, EntityType, Guid, ModhostError};
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    subtypes: HashMap<(EntityType, String), String>,
    entities: BTreeMap<i64, Entity>,
    markers: HashSet<String>,
    next_guid: i64,
}

/// Mutex-guarded entity store for tests.
///
/// Counts saves so tests can assert that an operation persisted nothing.
#[derive(Default)]
pub struct MemoryEntityStore {
    state: Mutex<State>,
    saves: AtomicUsize,
}

impl MemoryEntityStore {
    /// Create an empty store with no registered subtypes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored entity, ordered by guid.
    pub async fn all_entities(&self) -> Vec<Entity> {
        self.state.lock().await.entities.values().cloned().collect()
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn register_subtype(
        &self,
        entity_type: EntityType,
        subtype: &str,
        class: &str,
    ) -> Result<(), ModhostError> {
        let mut state = self.state.lock().await;
        state
            .subtypes
            .insert((entity_type, subtype.to_string()), class.to_string());
        Ok(())
    }

    async fn subtype_class(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Option<String>, ModhostError> {
        let state = self.state.lock().await;
        Ok(state
            .subtypes
            .get(&(entity_type, subtype.to_string()))
            .cloned())
    }

    async fn find_entities(
        &self,
        entity_type: EntityType,
        subtype: &str,
    ) -> Result<Vec<Entity>, ModhostError> {
        let state = self.state.lock().await;
        Ok(state
            .entities
            .values()
            .filter(|e| e.entity_type == entity_type && e.subtype == subtype)
            .cloned()
            .collect())
    }

    async fn save(&self, entity: &mut Entity) -> Result<Guid, ModhostError> {
        let mut state = self.state.lock().await;
        if !state
            .subtypes
            .contains_key(&(entity.entity_type, entity.subtype.clone()))
        {
            return Err(ModhostError::storage(format!(
                "subtype `{}/{}` is not registered",
                entity.entity_type, entity.subtype
            )));
        }

        let guid = match entity.guid {
            Some(Guid(guid)) if state.entities.contains_key(&guid) => guid,
            Some(Guid(guid)) => {
                return Err(ModhostError::storage(format!(
                    "entity {guid} no longer exists"
                )));
            }
            None => {
                state.next_guid += 1;
                state.next_guid
            }
        };

        entity.guid = Some(Guid(guid));
        state.entities.insert(guid, entity.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(Guid(guid))
    }

    async fn clear_metadata(&self, guid: Guid, name: &str) -> Result<bool, ModhostError> {
        let mut state = self.state.lock().await;
        Ok(state
            .entities
            .get_mut(&guid.0)
            .and_then(|e| e.metadata.remove(name))
            .is_some())
    }

    async fn has_run(&self, key: &str) -> Result<bool, ModhostError> {
        Ok(self.state.lock().await.markers.contains(key))
    }

    async fn run_once(&self, key: &str) -> Result<bool, ModhostError> {
        let mut state = self.state.lock().await;
        Ok(state.markers.insert(key.to_string()))
    }

    async fn close(&self) -> Result<(), ModhostError> {
        Ok(())
    }
}
