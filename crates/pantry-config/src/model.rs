// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Pantry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Pantry configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PantryConfig {
    /// Application shell settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Durable item store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Application shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the list.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Currency code assumed for new items and legacy-record backfill.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// How many days ahead the expiration alert looks.
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            default_currency: default_currency(),
            expiry_warning_days: default_expiry_warning_days(),
        }
    }
}

fn default_app_name() -> String {
    "pantry".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_currency() -> String {
    "JPY".to_string()
}

fn default_expiry_warning_days() -> u32 {
    3
}

/// Durable item store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file. `:memory:` selects a volatile
    /// store with no persistence grant.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Root for the per-process media handle scratch directory. `None`
    /// falls back to the system temp directory.
    #[serde(default)]
    pub media_scratch_dir: Option<String>,

    /// Trash retention window in days. Trashed records older than this are
    /// garbage-collected on load.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Byte budget reported as the quota in storage estimates.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            media_scratch_dir: None,
            retention_days: default_retention_days(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("pantry").join("pantry.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("pantry.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_retention_days() -> u32 {
    30
}

fn default_quota_bytes() -> u64 {
    // 1 GiB, generous for a personal list with photos.
    1024 * 1024 * 1024
}
