// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as known log levels and a sane retention window.

use std::str::FromStr;

use pantry_core::Currency;

use crate::diagnostic::ConfigError;
use crate::model::PantryConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PantryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let level = config.app.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{level}` is not one of: {}",
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if Currency::from_str(config.app.default_currency.trim()).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.default_currency `{}` is not a supported currency code",
                config.app.default_currency
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.storage.retention_days == 0 {
        errors.push(ConfigError::Validation {
            message: "storage.retention_days must be at least 1".to_string(),
        });
    }

    if config.storage.quota_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "storage.quota_bytes must be non-zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
