// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary via
//! `embed_migrations!` and applied when a [`Database`](crate::Database) opens.

use modhost_core::ModhostError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), ModhostError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| ModhostError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
