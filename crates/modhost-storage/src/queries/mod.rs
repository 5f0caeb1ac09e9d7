// SPDX-FileCopyrightText: 2026 Modhost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules behind the SQLite entity store.

pub mod entities;
pub mod markers;
pub mod subtypes;
