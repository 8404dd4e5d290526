// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the durable item store.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::types::{ShoppingItem, StorageEstimate};

/// Durable, keyed, single-record-atomic storage for shopping items.
///
/// This is the outward interface consumed by application shells. Every
/// operation is asynchronous and may suspend the caller; no operation
/// exposes cancellation. Each save/remove is atomic for that one record,
/// with no cross-record transactional guarantees.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Open or create the backing store. Idempotent and safe to invoke on
    /// every operation; implementations open lazily on first use.
    async fn initialize(&self) -> Result<(), PantryError>;

    /// Flush pending writes and release the backing store.
    async fn close(&self) -> Result<(), PantryError>;

    /// The full rehydration pipeline: negotiate persistence (best effort),
    /// read every record with fresh media handles and legacy backfill,
    /// garbage-collect expired trash, and return the ordered list.
    ///
    /// Expired-trash records are excluded from the result even while their
    /// background deletes are still in flight.
    async fn load_all(&self) -> Result<Vec<ShoppingItem>, PantryError>;

    /// Upsert one record keyed by `item.id`, overwriting any existing
    /// record with the same id. Transient media handles are stripped before
    /// the write; only `{id, kind, payload}` is persisted per media entry.
    ///
    /// Resolves once the write is durably committed. A storage failure is
    /// surfaced to the caller without retry; the caller owns any
    /// user-facing fallback.
    async fn save(&self, item: &ShoppingItem) -> Result<(), PantryError>;

    /// Permanently delete the record with the given id. Removing an id that
    /// was never stored is a no-op success.
    async fn remove(&self, id: &str) -> Result<(), PantryError>;

    /// Negotiate a "do not evict" persistence grant with the host.
    ///
    /// Idempotent; an already-active grant returns `true` immediately.
    /// Hosts without the capability report `false` rather than an error.
    /// When `false`, retention promises degrade to best effort.
    async fn request_persistence(&self) -> bool;

    /// Approximate space used and available. `None` when the host cannot
    /// report usage. Read-only and safe to poll.
    async fn estimate_usage(&self) -> Option<StorageEstimate>;
}
