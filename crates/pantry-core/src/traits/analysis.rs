// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contract for the external image-analysis collaborator.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::types::{Currency, ItemAnalysis};

/// Opaque external service that suggests item fields from a photo.
///
/// The request is one image plus the target currency; the response is an
/// [`ItemAnalysis`]. Pantry ships no implementation; application shells
/// inject their own client (or none, when the feature is disabled).
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyze a single image and propose name, category, price, and notes.
    ///
    /// `price` in the response is `None` when not visible or unknown.
    async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        currency: Currency,
    ) -> Result<ItemAnalysis, PantryError>;
}
