// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity subtype registration.

use modhost_core::{EntityType, ModhostError};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;

/// Register a subtype, updating the class if it is already registered.
pub async fn register_subtype(
    db: &Database,
    entity_type: EntityType,
    subtype: &str,
    class: &str,
) -> Result<(), ModhostError> {
    let entity_type = entity_type.to_string();
    let subtype = subtype.to_string();
    let class = class.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO entity_subtypes (entity_type, subtype, class) VALUES (?1, ?2, ?3)
                 ON CONFLICT (entity_type, subtype) DO UPDATE SET class = excluded.class",
                params![entity_type, subtype, class],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the class registered for a subtype.
pub async fn subtype_class(
    db: &Database,
    entity_type: EntityType,
    subtype: &str,
) -> Result<Option<String>, ModhostError> {
    let entity_type = entity_type.to_string();
    let subtype = subtype.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT class FROM entity_subtypes WHERE entity_type = ?1 AND subtype = ?2",
                params![entity_type, subtype],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_and_lookup_roundtrips() {
        let db = Database::open_in_memory().await.unwrap();
        register_subtype(&db, EntityType::Object, "plugin", "ModhostPlugin")
            .await
            .unwrap();

        let class = subtype_class(&db, EntityType::Object, "plugin").await.unwrap();
        assert_eq!(class.as_deref(), Some("ModhostPlugin"));
    }

    #[tokio::test]
    async fn unknown_subtype_returns_none() {
        let db = Database::open_in_memory().await.unwrap();
        let class = subtype_class(&db, EntityType::Object, "blog").await.unwrap();
        assert!(class.is_none());
    }

    #[tokio::test]
    async fn reregistering_updates_class_without_duplicating() {
        let db = Database::open_in_memory().await.unwrap();
        register_subtype(&db, EntityType::Object, "plugin", "Old").await.unwrap();
        register_subtype(&db, EntityType::Object, "plugin", "New").await.unwrap();

        let class = subtype_class(&db, EntityType::Object, "plugin").await.unwrap();
        assert_eq!(class.as_deref(), Some("New"));

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM entity_subtypes", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn subtypes_are_scoped_by_base_type() {
        let db = Database::open_in_memory().await.unwrap();
        register_subtype(&db, EntityType::Object, "plugin", "ModhostPlugin")
            .await
            .unwrap();
        let class = subtype_class(&db, EntityType::User, "plugin").await.unwrap();
        assert!(class.is_none());
    }
}
