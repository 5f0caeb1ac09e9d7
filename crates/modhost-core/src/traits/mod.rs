// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator contracts consumed by the plugin layer.
//!
//! The entity store is async and object-safe (`#[async_trait]`) so it can be
//! shared as `Arc<dyn EntityStore>`. View and translation registration are
//! plain synchronous filesystem work.

pub mod entity;
pub mod registrar;

pub use entity::EntityStore;
pub use registrar::{TranslationRegistrar, ViewRegistrar};
