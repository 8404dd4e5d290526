// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory item list: an explicit, injectable state container over an
//! [`ItemStore`].
//!
//! Mutations apply to the in-memory list first and then persist. A failed
//! write is logged and surfaced to the caller, but the optimistic state is
//! deliberately not rolled back; the list stays responsive and the next
//! successful save converges the store.

use std::sync::Arc;

use tracing::{error, warn};

use pantry_core::{
    Category, Currency, ItemAnalysis, ItemStatus, ItemStore, MediaItem, PantryError,
    ShoppingItem, StorageEstimate, generate_id, now_ms,
};

/// Form draft for a new item. Everything except the name may be left at its
/// default.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: Option<f64>,
    pub currency: Currency,
    pub store: Option<String>,
    /// Initial stock status, `to-buy` unless the form says otherwise.
    pub status: ItemStatus,
    pub notes: String,
    pub media: Vec<MediaItem>,
    pub expiry_date: Option<i64>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Others.to_string(),
            price: None,
            currency: Currency::default(),
            store: None,
            status: ItemStatus::ToBuy,
            notes: String::new(),
            media: Vec::new(),
            expiry_date: None,
        }
    }

    /// Pre-fill a draft from an image-analysis suggestion. Unknown category
    /// labels coerce to `Others`; an invisible price stays unknown.
    pub fn from_analysis(analysis: ItemAnalysis, currency: Currency) -> Self {
        Self {
            name: analysis.name,
            category: Category::from_label(&analysis.category).to_string(),
            price: analysis.price,
            currency,
            store: None,
            status: ItemStatus::ToBuy,
            notes: analysis.notes,
            media: Vec::new(),
            expiry_date: None,
        }
    }
}

/// Owns the live list and the store behind it.
pub struct ItemList {
    store: Arc<dyn ItemStore>,
    items: Vec<ShoppingItem>,
}

impl ItemList {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
        }
    }

    /// Run the full rehydration pipeline and publish the result.
    ///
    /// Infallible by contract: a load failure is logged and the list comes
    /// up empty rather than poisoning the session.
    pub async fn load(&mut self) {
        match self.store.load_all().await {
            Ok(items) => self.items = items,
            Err(error) => {
                error!(%error, "failed to load items; starting with an empty list");
                self.items = Vec::new();
            }
        }
    }

    /// Every record currently held, trash included, in display order.
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Records not in the recycle bin, in display order.
    pub fn active(&self) -> Vec<&ShoppingItem> {
        self.items.iter().filter(|i| !i.is_trashed()).collect()
    }

    /// Recycle bin contents, most recently trashed first.
    pub fn trash(&self) -> Vec<&ShoppingItem> {
        let mut trashed: Vec<&ShoppingItem> =
            self.items.iter().filter(|i| i.is_trashed()).collect();
        trashed.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        trashed
    }

    /// Create a record from a draft, append it, persist it. Returns the new
    /// id; the record stays in the list even if the write fails.
    pub async fn add(&mut self, draft: NewItem) -> Result<String, PantryError> {
        let created_at = now_ms();
        let item = ShoppingItem {
            id: generate_id(),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            currency: draft.currency,
            store: draft.store,
            status: draft.status,
            notes: draft.notes,
            media: draft.media,
            expiry_date: draft.expiry_date,
            created_at,
            deleted_at: None,
            order: Some(created_at),
        };
        let id = item.id.clone();
        self.items.push(item);
        self.persist(&id).await?;
        Ok(id)
    }

    /// Replace the record with the same id and persist the result.
    pub async fn update(&mut self, item: ShoppingItem) -> Result<(), PantryError> {
        let id = item.id.clone();
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(slot) => *slot = item,
            None => {
                warn!(%id, "update for an id not in the list; ignoring");
                return Ok(());
            }
        }
        self.persist(&id).await
    }

    /// One-tap toggle between `to-buy` and `in-stock`.
    pub async fn toggle_status(&mut self, id: &str) -> Result<(), PantryError> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.status = item.status.toggled();
            self.persist(id).await?;
        }
        Ok(())
    }

    /// Move a record to the recycle bin.
    pub async fn soft_delete(&mut self, id: &str) -> Result<(), PantryError> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.deleted_at = Some(now_ms());
            self.persist(id).await?;
        }
        Ok(())
    }

    /// Bring a trashed record back to the active list.
    pub async fn restore(&mut self, id: &str) -> Result<(), PantryError> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.deleted_at = None;
            self.persist(id).await?;
        }
        Ok(())
    }

    /// Permanently delete one record, bypassing the bin.
    pub async fn delete_permanent(&mut self, id: &str) -> Result<(), PantryError> {
        self.items.retain(|i| i.id != id);
        self.store.remove(id).await.inspect_err(|error| {
            error!(%id, %error, "permanent delete failed");
        })
    }

    /// Permanently delete every record in the recycle bin. Failures are
    /// logged per record; the first one is returned after the sweep.
    pub async fn empty_bin(&mut self) -> Result<(), PantryError> {
        let trashed: Vec<String> = self
            .items
            .iter()
            .filter(|i| i.is_trashed())
            .map(|i| i.id.clone())
            .collect();
        self.items.retain(|i| !i.is_trashed());

        let mut first_error = None;
        for id in trashed {
            if let Err(error) = self.store.remove(&id).await {
                error!(%id, %error, "failed to purge trashed record");
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Current storage footprint, when the host can report one.
    pub async fn storage_stats(&self) -> Option<StorageEstimate> {
        self.store.estimate_usage().await
    }

    async fn persist(&self, id: &str) -> Result<(), PantryError> {
        let item = self
            .items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| PantryError::Internal(format!("no item {id} to persist")))?;
        self.store.save(item).await.inspect_err(|error| {
            // Optimistic state is kept; the list stays ahead of the store.
            error!(%id, %error, "failed to persist item");
        })
    }
}
