// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Pantry.
//!
//! Implements the [`pantry_core::ItemStore`] trait over a single SQLite
//! database with WAL journaling, embedded refinery migrations, and a
//! per-process scratch directory for transient media display handles.
//!
//! Design points:
//! - All writes funnel through tokio-rusqlite's one background thread, so
//!   each upsert/delete is atomic per record.
//! - Media payloads are embedded in the owning row; display handles are
//!   stripped on write and synthesized fresh on every load.
//! - Trashed records past the retention window are garbage-collected in the
//!   background during load and excluded from the returned list.

pub mod adapter;
pub mod database;
pub mod media;
pub mod migrations;
pub mod queries;
pub mod quota;
pub mod retention;

pub use adapter::SqliteItemStore;
pub use database::Database;
pub use media::{HandleRegistry, StoredMedia};
