// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the modhost plugin host.
//!
//! This crate provides the error type, the generic entity model and the
//! collaborator traits (entity store, view and translation registration)
//! that the plugin layer is built on. Concrete implementations live in
//! `modhost-storage` and `modhost-plugin`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ModhostError;
pub use types::{Entity, EntityType, Guid};

pub use traits::{EntityStore, TranslationRegistrar, ViewRegistrar};
