// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ItemStore trait.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use pantry_config::StorageConfig;
use pantry_core::{ItemStore, PantryError, ShoppingItem, StorageEstimate, now_ms};

use crate::database::Database;
use crate::media::HandleRegistry;
use crate::{queries, quota, retention};

/// SQLite-backed item store.
///
/// Wraps a [`Database`] handle and delegates query work to the typed query
/// modules. The database opens lazily on first use and opening is
/// idempotent, so every trait operation is safe as the first call.
pub struct SqliteItemStore {
    config: StorageConfig,
    db: OnceCell<Database>,
    handles: OnceCell<HandleRegistry>,
    /// Latched once a persistence grant succeeds.
    persisted: AtomicBool,
}

impl SqliteItemStore {
    /// Create a store for the given configuration. No I/O happens until the
    /// first operation.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
            handles: OnceCell::new(),
            persisted: AtomicBool::new(false),
        }
    }

    async fn db(&self) -> Result<&Database, PantryError> {
        self.db
            .get_or_try_init(|| async { Database::open(&self.config.database_path).await })
            .await
    }

    async fn handles(&self) -> Result<&HandleRegistry, PantryError> {
        self.handles
            .get_or_try_init(|| async { HandleRegistry::new(self.scratch_root()) })
            .await
    }

    fn scratch_root(&self) -> PathBuf {
        self.config
            .media_scratch_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    fn retention_ms(&self) -> i64 {
        i64::from(self.config.retention_days) * 24 * 60 * 60 * 1000
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn initialize(&self) -> Result<(), PantryError> {
        self.db().await?;
        self.handles().await?;
        debug!(path = %self.config.database_path, "item store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PantryError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ShoppingItem>, PantryError> {
        // Best-effort persistence negotiation; a refusal never blocks the load.
        if !self.request_persistence().await {
            debug!("no persistence grant; retention is best effort");
        }

        let db = self.db().await?;
        let handles = self.handles().await?;

        // Release last generation's display handles before synthesizing the
        // replacement set.
        handles.reset()?;
        let items = queries::items::get_all(db, handles).await?;

        let (kept, expired) = retention::partition_expired(items, now_ms(), self.retention_ms());
        for id in expired {
            let db = db.clone();
            tokio::spawn(async move {
                if let Err(error) = queries::items::delete(&db, &id).await {
                    warn!(%id, %error, "failed to purge expired trash record");
                } else {
                    debug!(%id, "purged expired trash record");
                }
            });
        }
        Ok(kept)
    }

    async fn save(&self, item: &ShoppingItem) -> Result<(), PantryError> {
        queries::items::upsert(self.db().await?, item).await
    }

    async fn remove(&self, id: &str) -> Result<(), PantryError> {
        queries::items::delete(self.db().await?, id).await
    }

    async fn request_persistence(&self) -> bool {
        if self.persisted.load(Ordering::Relaxed) {
            return true;
        }
        let Ok(db) = self.db().await else {
            return false;
        };
        if !db.is_persistent() {
            // Volatile host; the capability simply is not there.
            return false;
        }
        match db.checkpoint().await {
            Ok(()) => {
                self.persisted.store(true, Ordering::Relaxed);
                true
            }
            Err(error) => {
                warn!(%error, "persistence negotiation failed");
                false
            }
        }
    }

    async fn estimate_usage(&self) -> Option<StorageEstimate> {
        let db = self.db().await.ok()?;
        let handles = self.handles().await.ok()?;
        quota::estimate(db.path(), handles.root(), self.config.quota_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::{Currency, ItemStatus, MediaItem, MediaKind};
    use tempfile::tempdir;

    fn make_config(dir: &tempfile::TempDir, db_name: &str) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join(db_name).to_string_lossy().into_owned(),
            media_scratch_dir: Some(dir.path().join("scratch").to_string_lossy().into_owned()),
            retention_days: 30,
            quota_bytes: 1024 * 1024,
        }
    }

    fn make_item(id: &str, order: i64) -> ShoppingItem {
        ShoppingItem {
            id: id.to_string(),
            name: "Milk".to_string(),
            category: "Food & Drinks".to_string(),
            price: Some(250.0),
            currency: Currency::Jpy,
            store: None,
            status: ItemStatus::ToBuy,
            notes: String::new(),
            media: Vec::new(),
            expiry_date: None,
            created_at: now_ms(),
            deleted_at: None,
            order: Some(order),
        }
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "init.db"));
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();
        assert!(dir.path().join("init.db").exists());
    }

    #[tokio::test]
    async fn operations_open_the_store_lazily() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "lazy.db"));
        // No initialize call; save opens on demand.
        store.save(&make_item("item-1", 1)).await.unwrap();
        let items = store.load_all().await.unwrap();
        assert_eq!(items.len(), 1);
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn save_load_remove_lifecycle() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "lifecycle.db"));

        let mut item = make_item("item-1", 1);
        item.media = vec![MediaItem {
            id: "m1".to_string(),
            kind: MediaKind::Image,
            payload: b"pixels".to_vec(),
            handle: None,
        }];
        store.save(&item).await.unwrap();

        let items = store.load_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].media[0].handle.is_some());

        store.remove("item-1").await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn file_backed_store_grants_persistence() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "grant.db"));
        assert!(store.request_persistence().await);
        // Idempotent: the grant stays latched.
        assert!(store.request_persistence().await);
    }

    #[tokio::test]
    async fn volatile_store_reports_no_grant_without_error() {
        let dir = tempdir().unwrap();
        let mut config = make_config(&dir, "unused.db");
        config.database_path = ":memory:".to_string();
        let store = SqliteItemStore::new(config);
        assert!(!store.request_persistence().await);
        // A refused grant never fails the load itself.
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn estimate_reflects_saved_data() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "estimate.db"));
        let mut item = make_item("item-1", 1);
        item.media = vec![MediaItem {
            id: "m1".to_string(),
            kind: MediaKind::Image,
            payload: vec![0u8; 4096],
            handle: None,
        }];
        store.save(&item).await.unwrap();
        store.close().await.unwrap();

        let est = store.estimate_usage().await.unwrap();
        assert!(est.usage_bytes > 0);
        assert_eq!(est.quota_bytes, 1024 * 1024);
    }

    #[tokio::test]
    async fn volatile_store_has_no_estimate() {
        let dir = tempdir().unwrap();
        let mut config = make_config(&dir, "unused.db");
        config.database_path = ":memory:".to_string();
        let store = SqliteItemStore::new(config);
        store.initialize().await.unwrap();
        assert!(store.estimate_usage().await.is_none());
    }

    #[tokio::test]
    async fn expired_trash_is_excluded_and_purged_in_background() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "retention.db"));

        let day_ms: i64 = 24 * 60 * 60 * 1000;
        let mut stale = make_item("stale", 1);
        stale.deleted_at = Some(now_ms() - 31 * day_ms);
        let mut recent = make_item("recent", 2);
        recent.deleted_at = Some(now_ms() - day_ms);
        let active = make_item("active", 3);
        store.save(&stale).await.unwrap();
        store.save(&recent).await.unwrap();
        store.save(&active).await.unwrap();

        // Excluded from the result immediately, ahead of the actual delete.
        let items = store.load_all().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["recent", "active"]);

        // The background purge lands on a subsequent load.
        let mut purged = false;
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let items = store.load_all().await.unwrap();
            if !items.iter().any(|i| i.id == "stale") && items.len() == 2 {
                let count: i64 = store
                    .db()
                    .await
                    .unwrap()
                    .connection()
                    .call(|conn| {
                        let n = conn.query_row(
                            "SELECT COUNT(*) FROM items WHERE id = 'stale'",
                            [],
                            |row| row.get(0),
                        )?;
                        Ok::<_, rusqlite::Error>(n)
                    })
                    .await
                    .unwrap();
                if count == 0 {
                    purged = true;
                    break;
                }
            }
        }
        assert!(purged, "expired trash row should be deleted in background");
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn load_all_synthesizes_fresh_handles_each_time() {
        let dir = tempdir().unwrap();
        let store = SqliteItemStore::new(make_config(&dir, "handles.db"));
        let mut item = make_item("item-1", 1);
        item.media = vec![MediaItem {
            id: "m1".to_string(),
            kind: MediaKind::Image,
            payload: b"pixels".to_vec(),
            handle: None,
        }];
        store.save(&item).await.unwrap();

        let first = store.load_all().await.unwrap();
        let first_handle = first[0].media[0].handle.clone().unwrap();
        assert!(first_handle.path().exists());

        let second = store.load_all().await.unwrap();
        let second_handle = second[0].media[0].handle.clone().unwrap();
        // Same payload, live file, synthesized anew on this load.
        assert!(second_handle.path().exists());
        assert_eq!(
            std::fs::read(second_handle.path()).unwrap(),
            b"pixels"
        );
        store.close().await.unwrap();
    }
}
