// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity and metadata CRUD operations.

use std::collections::BTreeMap;

use modhost_core::{Entity, EntityType, Guid, ModhostError};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;

/// Result of a save attempt, decided inside the writer thread.
enum SaveOutcome {
    Saved(i64),
    UnknownSubtype,
    Missing(i64),
}

/// Find all entities of a type and subtype with their metadata, ordered by guid.
pub async fn find_entities(
    db: &Database,
    entity_type: EntityType,
    subtype: &str,
) -> Result<Vec<Entity>, ModhostError> {
    let type_name = entity_type.to_string();
    let subtype = subtype.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT e.guid, e.title, m.name, m.value
                 FROM entities e
                 LEFT JOIN metadata m ON m.entity_guid = e.guid
                 WHERE e.entity_type = ?1 AND e.subtype = ?2
                 ORDER BY e.guid, m.name",
            )?;
            let rows = stmt.query_map(params![type_name, subtype], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?;

            let mut entities: Vec<Entity> = Vec::new();
            for row in rows {
                let (guid, title, name, value) = row?;
                let start_new = entities.last().and_then(|e| e.guid) != Some(Guid(guid));
                if start_new {
                    entities.push(Entity {
                        guid: Some(Guid(guid)),
                        entity_type,
                        subtype: subtype.clone(),
                        title,
                        metadata: BTreeMap::new(),
                    });
                }
                if let (Some(name), Some(value), Some(entity)) = (name, value, entities.last_mut())
                {
                    entity.metadata.insert(name, value);
                }
            }
            Ok(entities)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or fully replace an entity and its metadata in one transaction.
///
/// Assigns `entity.guid` on first save.
pub async fn save_entity(db: &Database, entity: &mut Entity) -> Result<Guid, ModhostError> {
    let snapshot = entity.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let type_name = snapshot.entity_type.to_string();

            let registered = tx
                .query_row(
                    "SELECT 1 FROM entity_subtypes WHERE entity_type = ?1 AND subtype = ?2",
                    params![type_name, snapshot.subtype],
                    |_| Ok(()),
                )
                .optional()?;
            if registered.is_none() {
                return Ok(SaveOutcome::UnknownSubtype);
            }

            let guid = match snapshot.guid {
                Some(Guid(guid)) => {
                    let updated = tx.execute(
                        "UPDATE entities
                         SET title = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                         WHERE guid = ?2",
                        params![snapshot.title, guid],
                    )?;
                    if updated == 0 {
                        return Ok(SaveOutcome::Missing(guid));
                    }
                    tx.execute(
                        "DELETE FROM metadata WHERE entity_guid = ?1",
                        params![guid],
                    )?;
                    guid
                }
                None => {
                    tx.execute(
                        "INSERT INTO entities (entity_type, subtype, title) VALUES (?1, ?2, ?3)",
                        params![type_name, snapshot.subtype, snapshot.title],
                    )?;
                    tx.last_insert_rowid()
                }
            };

            {
                let mut insert = tx.prepare(
                    "INSERT INTO metadata (entity_guid, name, value) VALUES (?1, ?2, ?3)",
                )?;
                for (name, value) in &snapshot.metadata {
                    insert.execute(params![guid, name, value])?;
                }
            }

            tx.commit()?;
            Ok(SaveOutcome::Saved(guid))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        SaveOutcome::Saved(guid) => {
            entity.guid = Some(Guid(guid));
            Ok(Guid(guid))
        }
        SaveOutcome::UnknownSubtype => Err(ModhostError::storage(format!(
            "subtype `{}/{}` is not registered",
            entity.entity_type, entity.subtype
        ))),
        SaveOutcome::Missing(guid) => Err(ModhostError::storage(format!(
            "entity {guid} no longer exists"
        ))),
    }
}

/// Remove one metadata key from an entity. Returns `true` if a row was removed.
pub async fn clear_metadata(db: &Database, guid: Guid, name: &str) -> Result<bool, ModhostError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM metadata WHERE entity_guid = ?1 AND name = ?2",
                params![guid.0, name],
            )?;
            if removed > 0 {
                conn.execute(
                    "UPDATE entities SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                     WHERE guid = ?1",
                    params![guid.0],
                )?;
            }
            Ok(removed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
