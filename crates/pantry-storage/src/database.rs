// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pantry_core::PantryError;
use tokio_rusqlite::Connection;

/// Handle to the open SQLite database.
///
/// Cloning is cheap and shares the same background connection thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
    /// `None` for an in-memory database.
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// pending migrations. `:memory:` opens a volatile database.
    pub async fn open(path: &str) -> Result<Self, PantryError> {
        let (conn, file_path) = if path == ":memory:" {
            let conn = Connection::open_in_memory()
                .await
                .map_err(|e| map_open_err(e.into()))?;
            (conn, None)
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| PantryError::Open {
                        source: Box::new(e),
                    })?;
                }
            }
            let conn = Connection::open(path)
                .await
                .map_err(|e| map_open_err(e.into()))?;
            (conn, Some(PathBuf::from(path)))
        };

        let is_file = file_path.is_some();
        let migration = conn
            .call(move |conn| {
                if is_file {
                    conn.pragma_update(None, "journal_mode", "WAL")?;
                }
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.busy_timeout(Duration::from_secs(5))?;
                Ok(crate::migrations::run_migrations(conn))
            })
            .await
            .map_err(map_open_err)?;
        migration?;

        tracing::debug!(path, "database open");
        Ok(Self {
            conn,
            path: file_path,
        })
    }

    /// The shared connection handle for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Filesystem path of the database, `None` for `:memory:`.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the database is backed by a file rather than volatile memory.
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Checkpoint the WAL so every committed write reaches the main database
    /// file. No-op for in-memory databases.
    pub async fn checkpoint(&self) -> Result<(), PantryError> {
        if self.path.is_none() {
            return Ok(());
        }
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Flush pending writes. The underlying connection is released when the
    /// last clone drops.
    pub async fn close(&self) -> Result<(), PantryError> {
        self.checkpoint().await
    }
}

/// Map a tokio-rusqlite error from a regular query into the storage error.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> PantryError {
    PantryError::Storage {
        source: Box::new(e),
    }
}

fn map_open_err(e: tokio_rusqlite::Error) -> PantryError {
    PantryError::Open {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/deeper/test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db.is_persistent());
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_in_memory_reports_no_path() {
        let db = Database::open(":memory:").await.unwrap();
        assert!(!db.is_persistent());
        assert!(db.path().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_a_migration_noop() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }
}
