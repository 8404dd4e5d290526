// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item CRUD and the read-side rehydration pipeline.
//!
//! Writes strip transient media handles before persisting; reads decode the
//! stored rows, synthesize fresh handles, backfill legacy defaults, and
//! return the list in display order.

use pantry_core::{Currency, ItemStatus, PantryError, ShoppingItem};
use rusqlite::params;

use crate::database::Database;
use crate::media::{self, HandleRegistry};

const COLUMNS: &str = "id, name, category, price, currency, store, status, notes, media, \
                       expiry_date, created_at, deleted_at, sort_order";

/// One raw row, before media decoding and enum parsing.
struct ItemRow {
    id: String,
    name: String,
    category: String,
    price: Option<f64>,
    currency: Option<String>,
    store: Option<String>,
    status: String,
    notes: String,
    media: String,
    expiry_date: Option<i64>,
    created_at: i64,
    deleted_at: Option<i64>,
    sort_order: Option<i64>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemRow> {
    Ok(ItemRow {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        currency: row.get(4)?,
        store: row.get(5)?,
        status: row.get(6)?,
        notes: row.get(7)?,
        media: row.get(8)?,
        expiry_date: row.get(9)?,
        created_at: row.get(10)?,
        deleted_at: row.get(11)?,
        sort_order: row.get(12)?,
    })
}

/// Upsert one record keyed by id. An existing row with the same id is
/// overwritten wholesale; the write is atomic for that one row.
pub async fn upsert(db: &Database, item: &ShoppingItem) -> Result<(), PantryError> {
    let media_doc = media::to_document(&item.media)?;
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO items (id, name, category, price, currency, store, status, notes, \
                                    media, expiry_date, created_at, deleted_at, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     category = excluded.category,
                     price = excluded.price,
                     currency = excluded.currency,
                     store = excluded.store,
                     status = excluded.status,
                     notes = excluded.notes,
                     media = excluded.media,
                     expiry_date = excluded.expiry_date,
                     created_at = excluded.created_at,
                     deleted_at = excluded.deleted_at,
                     sort_order = excluded.sort_order",
                params![
                    item.id,
                    item.name,
                    item.category,
                    item.price,
                    item.currency.to_string(),
                    item.store,
                    item.status.to_string(),
                    item.notes,
                    media_doc,
                    item.expiry_date,
                    item.created_at,
                    item.deleted_at,
                    item.order,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Permanently delete a record. Deleting an unknown id is a no-op success.
pub async fn delete(db: &Database, id: &str) -> Result<(), PantryError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Read every record, rehydrate media handles, backfill legacy defaults,
/// and sort into display order.
///
/// Trashed records are included; retention filtering belongs to the caller.
pub async fn get_all(
    db: &Database,
    handles: &HandleRegistry,
) -> Result<Vec<ShoppingItem>, PantryError> {
    let rows: Vec<ItemRow> = db
        .connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM items"))?;
            let mapped = stmt.query_map([], read_row)?;
            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            Ok(rows)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(revive(row, handles)?);
    }
    sort_items(&mut items);
    // Backfill after sorting so records that predate explicit ordering still
    // form the trailing created_at-descending group on this load.
    for item in &mut items {
        if item.order.is_none() {
            item.order = Some(item.created_at);
        }
    }
    Ok(items)
}

/// Turn a raw row into a live record with fresh media handles.
fn revive(row: ItemRow, handles: &HandleRegistry) -> Result<ShoppingItem, PantryError> {
    let status: ItemStatus = row.status.parse().map_err(|e| PantryError::Storage {
        source: Box::new(e),
    })?;
    let currency = match row.currency {
        Some(code) => code.parse::<Currency>().map_err(|e| PantryError::Storage {
            source: Box::new(e),
        })?,
        // Rows that predate the currency column assume the baseline code.
        None => Currency::default(),
    };
    let stored = media::from_document(&row.media)?;
    let media = handles.rehydrate(&row.id, stored)?;
    Ok(ShoppingItem {
        id: row.id,
        name: row.name,
        category: row.category,
        price: row.price,
        currency,
        store: row.store,
        status,
        notes: row.notes,
        media,
        expiry_date: row.expiry_date,
        created_at: row.created_at,
        deleted_at: row.deleted_at,
        order: row.sort_order,
    })
}

/// Display order: explicit `order` ascending first; records without one form
/// a trailing group sorted by `created_at` descending, which is also the
/// tie-break for equal orders.
///
/// The key is a total order, so mixed legacy and reordered sets sort
/// deterministically.
pub(crate) fn sort_items(items: &mut [ShoppingItem]) {
    items.sort_by(|a, b| {
        a.order
            .is_none()
            .cmp(&b.order.is_none())
            .then_with(|| a.order.unwrap_or(0).cmp(&b.order.unwrap_or(0)))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
