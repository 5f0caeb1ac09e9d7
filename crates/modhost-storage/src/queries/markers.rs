// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted run-once markers.

use modhost_core::ModhostError;
use rusqlite::params;

use crate::database::Database;

/// Whether `name` has been recorded.
pub async fn has_run(db: &Database, name: &str) -> Result<bool, ModhostError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let found: i64 = conn.query_row(
                "SELECT COUNT(*) FROM run_once WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )?;
            Ok(found > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record `name` as run. Returns `true` if this call inserted the marker.
pub async fn run_once(db: &Database, name: &str) -> Result<bool, ModhostError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO run_once (name) VALUES (?1)",
                params![name],
            )?;
            Ok(inserted == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_wins() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(run_once(&db, "plugin_run_once").await.unwrap());
        assert!(!run_once(&db, "plugin_run_once").await.unwrap());
        assert!(run_once(&db, "other_run_once").await.unwrap());
    }

    #[tokio::test]
    async fn has_run_does_not_record() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(!has_run(&db, "plugin_run_once").await.unwrap());
        assert!(!has_run(&db, "plugin_run_once").await.unwrap());
        assert!(run_once(&db, "plugin_run_once").await.unwrap());
        assert!(has_run(&db, "plugin_run_once").await.unwrap());
    }
}
