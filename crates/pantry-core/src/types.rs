// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the storage layer and application shells.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Current wall-clock time as Unix milliseconds.
///
/// All record timestamps (`created_at`, `deleted_at`, `expiry_date`) use
/// this representation.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stock status of a shopping item.
///
/// A plain mutable classification, not a state machine: any status may move
/// to any other. [`ItemStatus::toggled`] implements the one-tap shortcut
/// between `to-buy` and `in-stock`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    ToBuy,
    InStock,
    Low,
    /// Added in a later schema revision; older records never carry it.
    DontLike,
}

impl ItemStatus {
    /// The quick-toggle counterpart: `to-buy` becomes `in-stock`, everything
    /// else becomes `to-buy`.
    pub fn toggled(self) -> Self {
        match self {
            Self::ToBuy => Self::InStock,
            _ => Self::ToBuy,
        }
    }
}

/// Currency codes offered by the item form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    /// Baseline code, backfilled for legacy records that predate the field.
    #[default]
    Jpy,
    Cny,
    Mmk,
    Krw,
    Sgd,
}

impl Currency {
    /// Display symbol for price rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Jpy | Self::Cny => "\u{a5}",
            Self::Mmk => "K",
            Self::Krw => "\u{20a9}",
            Self::Sgd => "S$",
        }
    }
}

/// The fixed category vocabulary.
///
/// Records store the category as a free string; this enum exists for the UI
/// boundary, where unknown or legacy labels coerce to [`Category::Others`]
/// via [`Category::from_label`]. The store itself never validates categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    #[strum(serialize = "Cooking Ingredients")]
    #[serde(rename = "Cooking Ingredients")]
    CookingIngredients,
    #[strum(serialize = "Food & Drinks")]
    #[serde(rename = "Food & Drinks")]
    FoodAndDrinks,
    #[strum(serialize = "Household products")]
    #[serde(rename = "Household products")]
    HouseholdProducts,
    Cosmetics,
    Medicine,
    Clothing,
    Electronics,
    Others,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::CookingIngredients,
        Category::FoodAndDrinks,
        Category::HouseholdProducts,
        Category::Cosmetics,
        Category::Medicine,
        Category::Clothing,
        Category::Electronics,
        Category::Others,
    ];

    /// Lossy parse: unknown labels coerce to `Others`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Others)
    }
}

/// Kind of a media attachment, derived from the MIME type at ingestion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `video/*` maps to video; everything else is treated as an image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// A process-local display handle for a media payload.
///
/// Handles reference a scratch file owned by the current process lifetime.
/// They are never persisted: the durable payload is the single source of
/// truth and a fresh handle is synthesized from it on every load. A handle
/// from a previous process is meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(PathBuf);

impl MediaHandle {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A photo or video attached to a shopping item.
///
/// The type deliberately does not implement `Serialize`: the storage layer
/// owns the persisted form and strips the transient `handle` on write.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique within the owning record.
    pub id: String,
    pub kind: MediaKind,
    /// Raw file content, durably stored with the owning record.
    pub payload: Vec<u8>,
    /// Transient display handle; `None` until the storage layer synthesizes
    /// one, and `None` for entries with an empty payload.
    pub handle: Option<MediaHandle>,
}

/// A single shopping/inventory list record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    /// Globally unique, immutable once assigned at creation.
    pub id: String,
    pub name: String,
    /// Free string; see [`Category`] for the UI-boundary vocabulary.
    pub category: String,
    /// `None` is the explicit "unknown price" sentinel, distinct from zero.
    pub price: Option<f64>,
    pub currency: Currency,
    /// `None` is the "unknown store" sentinel.
    pub store: Option<String>,
    pub status: ItemStatus,
    pub notes: String,
    /// Ordered; the first entry is the cover.
    pub media: Vec<MediaItem>,
    /// Unix ms; meaningful for perishable categories only.
    pub expiry_date: Option<i64>,
    /// Unix ms, set once at creation.
    pub created_at: i64,
    /// Presence marks the record as trashed (soft delete).
    pub deleted_at: Option<i64>,
    /// Explicit sort key; legacy records without one are backfilled to
    /// `created_at` at read time.
    pub order: Option<i64>,
}

impl ShoppingItem {
    /// Whether the record currently sits in the recycle bin.
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Approximate storage footprint reported by the quota advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageEstimate {
    pub usage_bytes: u64,
    pub quota_bytes: u64,
}

/// Response contract of the external image-analysis collaborator.
///
/// The analyzer receives one image plus a target currency and suggests
/// form-fill values. `category` is a raw label; callers coerce it through
/// [`Category::from_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnalysis {
    pub name: String,
    pub category: String,
    /// `None` when the price is not visible or unknown.
    pub price: Option<f64>,
    pub notes: String,
}
