// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pantry shopping list persistence system.
//!
//! This crate provides the domain types, error type, id generation, and the
//! trait seams between the durable store and the application shell. The
//! SQLite implementation lives in `pantry-storage`; shell services live in
//! `pantry`.

pub mod error;
pub mod id;
pub mod traits;
pub mod types;

pub use error::PantryError;
pub use id::{fallback_id, generate_id};
pub use traits::{ImageAnalyzer, ItemStore};
pub use types::{
    now_ms, Category, Currency, ItemAnalysis, ItemStatus, MediaHandle, MediaItem, MediaKind,
    ShoppingItem, StorageEstimate,
};
