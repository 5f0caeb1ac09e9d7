// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for modhost integration tests.
//!
//! Provides in-process stand-ins for the collaborators and an on-disk
//! plugin tree builder, so tests run without a database or fixtures
//! checked into the repository.
//!
//! # Components
//!
//! - [`MemoryEntityStore`] - `EntityStore` backed by a mutex-guarded map
//! - [`RecordingViews`] / [`RecordingTranslations`] - registrars that record their calls
//! - [`PluginTree`] - temp directory laid out as a plugins root

pub mod memory_store;
pub mod plugin_tree;
pub mod recording;

pub use memory_store::MemoryEntityStore;
pub use plugin_tree::{PluginTree, PluginTreeBuilder};
pub use recording::{RecordingTranslations, RecordingViews, ViewRegistration};
