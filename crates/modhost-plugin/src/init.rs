// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time registration of the plugin settings subtype.

use modhost_core::{EntityStore, EntityType, ModhostError};
use tracing::info;

use crate::settings::PLUGIN_SUBTYPE;

/// Run-once marker guarding subtype registration.
pub const RUN_ONCE_KEY: &str = "plugin_run_once";

/// Class name bound to the `object/plugin` subtype.
pub const PLUGIN_CLASS: &str = "ModhostPlugin";

/// Register `object/plugin` unless this store already has.
///
/// The marker is persisted by the store and written only after the
/// registration succeeds, so a failed attempt is retried on the next boot.
pub async fn run_init_hook(store: &dyn EntityStore) -> Result<(), ModhostError> {
    if store.has_run(RUN_ONCE_KEY).await? {
        return Ok(());
    }
    store
        .register_subtype(EntityType::Object, PLUGIN_SUBTYPE, PLUGIN_CLASS)
        .await?;
    store.run_once(RUN_ONCE_KEY).await?;
    info!(
        store = store.name(),
        subtype = PLUGIN_SUBTYPE,
        class = PLUGIN_CLASS,
        "registered plugin settings subtype"
    );
    Ok(())
}
