// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generic entity model persisted by an [`EntityStore`](crate::EntityStore).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Store-assigned identifier of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Guid(pub i64);

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base type of an entity. Subtypes refine a base type and must be
/// registered with the store before entities of that subtype can be saved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Object,
    User,
    Group,
    Site,
}

/// A typed object with a title and string-keyed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// `None` until the entity is first saved.
    pub guid: Option<Guid>,
    pub entity_type: EntityType,
    pub subtype: String,
    pub title: String,
    pub metadata: BTreeMap<String, String>,
}

impl Entity {
    /// Create an unsaved entity with no metadata.
    pub fn new(entity_type: EntityType, subtype: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            guid: None,
            entity_type,
            subtype: subtype.into(),
            title: title.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Look up a metadata value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }

    /// Assign a metadata value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.metadata.insert(name.into(), value.into())
    }

    /// Whether this entity has been persisted.
    pub fn is_saved(&self) -> bool {
        self.guid.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_is_unsaved_and_empty() {
        let entity = Entity::new(EntityType::Object, "plugin", "thewire");
        assert!(!entity.is_saved());
        assert_eq!(entity.title, "thewire");
        assert!(entity.metadata.is_empty());
    }

    #[test]
    fn set_returns_previous_value() {
        let mut entity = Entity::new(EntityType::Object, "plugin", "thewire");
        assert_eq!(entity.set("limit", "140"), None);
        assert_eq!(entity.set("limit", "280"), Some("140".to_string()));
        assert_eq!(entity.get("limit"), Some("280"));
        assert_eq!(entity.get("missing"), None);
    }

    #[test]
    fn entity_type_serializes_lowercase() {
        let json = serde_json::to_string(&EntityType::Object).unwrap();
        assert_eq!(json, "\"object\"");
    }
}
