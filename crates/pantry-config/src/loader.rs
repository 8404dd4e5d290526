// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./pantry.toml` > `~/.config/pantry/pantry.toml`
//! > `/etc/pantry/pantry.toml` with environment variable overrides via the
//! `PANTRY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PantryConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pantry/pantry.toml` (system-wide)
/// 3. `~/.config/pantry/pantry.toml` (user XDG config)
/// 4. `./pantry.toml` (local directory)
/// 5. `PANTRY_*` environment variables
pub fn load_config() -> Result<PantryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::file("/etc/pantry/pantry.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pantry/pantry.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pantry.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PantryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PantryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PANTRY_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("PANTRY_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PANTRY_STORAGE_RETENTION_DAYS -> "storage_retention_days"
        let mapped = key
            .as_str()
            .replacen("app_", "app.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[app]
log_level = "debug"

[storage]
database_path = ":memory:"
quota_bytes = 1048576
"#,
        )
        .unwrap();
        assert_eq!(config.app.log_level, "debug");
        assert_eq!(config.storage.database_path, ":memory:");
        assert_eq!(config.storage.quota_bytes, 1_048_576);
        // Untouched sections keep their defaults.
        assert_eq!(config.storage.retention_days, 30);
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("pantry.toml", "[storage]\nretention_days = 7\n")?;
            jail.set_env("PANTRY_STORAGE_RETENTION_DAYS", "14");
            let config = load_config().expect("config should load");
            assert_eq!(config.storage.retention_days, 14);
            Ok(())
        });
    }

    #[test]
    fn env_mapping_preserves_underscored_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PANTRY_STORAGE_DATABASE_PATH", "/tmp/x.db");
            jail.set_env("PANTRY_APP_DEFAULT_CURRENCY", "USD");
            let config = load_config().expect("config should load");
            assert_eq!(config.storage.database_path, "/tmp/x.db");
            assert_eq!(config.app.default_currency, "USD");
            Ok(())
        });
    }
}
