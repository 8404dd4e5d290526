// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trash retention: classify loaded records against the retention window.
//!
//! Classification is pure; the load path issues the actual deletes in the
//! background so garbage collection never delays the returned list.

use pantry_core::ShoppingItem;

/// Default retention window: 30 days in milliseconds.
pub const RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Split a loaded set into records to keep and ids of expired trash.
///
/// A trashed record expires once `now - deleted_at` exceeds the window;
/// a record exactly at the boundary is kept. Active records always pass
/// through untouched.
pub fn partition_expired(
    items: Vec<ShoppingItem>,
    now_ms: i64,
    retention_ms: i64,
) -> (Vec<ShoppingItem>, Vec<String>) {
    let mut kept = Vec::with_capacity(items.len());
    let mut expired = Vec::new();
    for item in items {
        match item.deleted_at {
            Some(deleted_at) if now_ms - deleted_at > retention_ms => expired.push(item.id),
            _ => kept.push(item),
        }
    }
    (kept, expired)
}
