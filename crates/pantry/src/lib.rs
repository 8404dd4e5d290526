// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application shell services for Pantry.
//!
//! Glues the configuration, storage, and core layers together: the
//! [`ItemList`] state container with optimistic mutations, list filtering,
//! the expiration alert scan, and telemetry setup.

pub mod expiry;
pub mod filter;
pub mod state;
pub mod telemetry;

pub use expiry::upcoming_expirations;
pub use filter::ItemFilter;
pub use state::{ItemList, NewItem};

use std::sync::Arc;

use pantry_config::PantryConfig;
use pantry_storage::SqliteItemStore;

/// Build an [`ItemList`] backed by the configured SQLite store.
///
/// The store opens lazily; the caller usually follows up with
/// [`ItemList::load`].
pub fn item_list(config: &PantryConfig) -> ItemList {
    let store = SqliteItemStore::new(config.storage.clone());
    ItemList::new(Arc::new(store))
}
