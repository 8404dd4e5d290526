// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pantry persistence core.

use thiserror::Error;

/// The primary error type used across the storage trait and core operations.
///
/// Unsupported host capabilities (persistence grant, quota estimate) are not
/// errors; those operations report a negative result instead.
#[derive(Debug, Error)]
pub enum PantryError {
    /// Configuration errors (invalid TOML, bad values, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The durable store could not be opened or created. Fatal to the load
    /// path for the session; shells degrade to an empty list.
    #[error("failed to open item store: {source}")]
    Open {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read, write, or delete against the open store failed (quota
    /// exceeded, I/O error, corrupt row). The store does not retry.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Scratch-file I/O while synthesizing or releasing display handles.
    #[error("media handle error: {source}")]
    Media {
        #[from]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
