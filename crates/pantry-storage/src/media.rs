// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded media document codec and the process-local handle registry.
//!
//! Media attachments are persisted inline with their owning record as a JSON
//! document of `{id, type, payload}` entries. Display handles never enter
//! the document; they are synthesized fresh from the payload on every load.

use std::fs;
use std::path::{Path, PathBuf};

use pantry_core::{MediaHandle, MediaItem, MediaKind, PantryError};
use serde::{Deserialize, Serialize};

/// Persisted form of one media attachment.
///
/// This struct has no handle field, so a stale handle cannot round-trip
/// through storage by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMedia {
    /// Unique within the owning record.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Raw file content, base64 in the JSON document.
    #[serde(with = "payload_b64")]
    pub payload: Vec<u8>,
}

mod payload_b64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// Strip transient handles and encode a media sequence to its durable form.
pub fn to_document(media: &[MediaItem]) -> Result<String, PantryError> {
    let stored: Vec<StoredMedia> = media
        .iter()
        .map(|m| StoredMedia {
            id: m.id.clone(),
            kind: m.kind,
            payload: m.payload.clone(),
        })
        .collect();
    serde_json::to_string(&stored).map_err(|e| PantryError::Storage {
        source: Box::new(e),
    })
}

/// Decode a persisted media document.
pub fn from_document(doc: &str) -> Result<Vec<StoredMedia>, PantryError> {
    serde_json::from_str(doc).map_err(|e| PantryError::Storage {
        source: Box::new(e),
    })
}

/// Owns the scratch directory backing display handles.
///
/// The directory is scoped to the current process id, so handles from an
/// earlier process never alias a live file. `reset` releases every handle
/// synthesized so far; the load path calls it before synthesizing the next
/// generation.
pub struct HandleRegistry {
    root: PathBuf,
}

impl HandleRegistry {
    pub fn new(scratch_root: impl Into<PathBuf>) -> Result<Self, PantryError> {
        let root = scratch_root
            .into()
            .join(format!("pantry-media-{}", std::process::id()));
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Release every handle synthesized so far.
    pub fn reset(&self) -> Result<(), PantryError> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// Synthesize a fresh display handle for one stored attachment. Entries
    /// with an empty payload get no handle.
    ///
    /// Handles live in a per-item subdirectory, so ids containing `-` can
    /// never alias another record's scratch file.
    pub fn synthesize(
        &self,
        item_id: &str,
        media: &StoredMedia,
    ) -> Result<Option<MediaHandle>, PantryError> {
        if media.payload.is_empty() {
            return Ok(None);
        }
        let ext = match media.kind {
            MediaKind::Image => "img",
            MediaKind::Video => "vid",
        };
        let item_dir = self.root.join(item_id);
        fs::create_dir_all(&item_dir)?;
        let path = item_dir.join(format!("{}.{ext}", media.id));
        fs::write(&path, &media.payload)?;
        Ok(Some(MediaHandle::new(path)))
    }

    /// Rehydrate a full media sequence for one record, preserving order.
    pub fn rehydrate(
        &self,
        item_id: &str,
        stored: Vec<StoredMedia>,
    ) -> Result<Vec<MediaItem>, PantryError> {
        stored
            .into_iter()
            .map(|m| {
                let handle = self.synthesize(item_id, &m)?;
                Ok(MediaItem {
                    id: m.id,
                    kind: m.kind,
                    payload: m.payload,
                    handle,
                })
            })
            .collect()
    }
}
