// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the persistence core and its collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod analysis;
pub mod store;

pub use analysis::ImageAnalyzer;
pub use store::ItemStore;
