//! The `.note` marker file.
//!
//! A note records every marker of one image:
//!
//! ```json
//! {
//!   "version": 1,
//!   "imageName": "chest_xray",
//!   "createTime": "2026-10-17T08:00:00Z",
//!   "markers": [
//!     { "x": 120.5, "y": 88.0, "color": "#ff0000", "name": "标记1",
//!       "desc": "", "createTime": "2026-10-17 08:00:00", "updateTime": "" }
//!   ]
//! }
//! ```
//!
//! Import is strict about the two structural fields
//! (`imageName`, `markers`) and lenient about the per-marker text fields,
//! which default to empty.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{NOTE_EXTENSION, NOTE_VERSION};
use crate::format::error::FormatError;
use crate::model::Marker;
use crate::timestamp;

/// Contents of a note file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFile {
    pub version: u32,
    /// Image file name without extension.
    pub image_name: String,
    /// ISO 8601 export time.
    pub create_time: String,
    pub markers: Vec<Marker>,
}

impl NoteFile {
    /// Build a note for `image_name` stamped with the current time.
    pub fn new(image_name: impl Into<String>, markers: Vec<Marker>) -> Self {
        Self {
            version: NOTE_VERSION,
            image_name: image_name.into(),
            create_time: timestamp::now_iso8601(),
            markers,
        }
    }

    /// Default file name, `<imageName>.note`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.image_name, NOTE_EXTENSION)
    }

    /// Serialize with pretty printing for readability.
    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a note document.
    pub fn parse(json: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(json)?;
        let obj = value
            .as_object()
            .ok_or_else(|| FormatError::invalid_format("note must be a JSON object"))?;

        let image_name = match obj.get("imageName") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(FormatError::missing_field("imageName")),
        };

        let raw_markers = obj
            .get("markers")
            .and_then(Value::as_array)
            .ok_or_else(|| FormatError::invalid_format("'markers' must be an array"))?;

        let version = match obj.get("version") {
            None => NOTE_VERSION,
            Some(v) => v
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| FormatError::invalid_format("'version' must be a small integer"))?,
        };
        if version > NOTE_VERSION {
            log::warn!(
                "Note version {} is newer than supported version {}; reading anyway",
                version,
                NOTE_VERSION
            );
        }

        let create_time = obj
            .get("createTime")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let markers = raw_markers
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                Marker::deserialize(raw)
                    .map_err(|e| FormatError::invalid_format(format!("marker {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Parsed note for '{}' with {} markers (version {})",
            image_name,
            markers.len(),
            version
        );

        Ok(Self {
            version,
            image_name,
            create_time,
            markers,
        })
    }

    /// Write `<imageName>.note` into `dir` and return the path written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, FormatError> {
        let path = dir.join(self.file_name());
        log::info!("Exporting note to {:?}", path);
        std::fs::write(&path, self.to_json()?)?;
        log::info!("Exported {} markers", self.markers.len());
        Ok(path)
    }

    /// Read and validate a note file.
    pub fn read_from(path: &Path) -> Result<Self, FormatError> {
        log::info!("Importing note from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::parse(&json)
    }
}
