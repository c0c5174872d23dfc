//! Markers and their ordered store.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::MARKER_NAME_PREFIX;
use crate::geometry::Point;
use crate::timestamp;

/// A point marker on the image.
///
/// The position is always in natural image pixels, so it stays valid across
/// zoom, rotation and pan. Serialized field names follow the note file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub create_time: String,
    /// Empty until the first edit.
    #[serde(default)]
    pub update_time: String,
}

impl Marker {
    /// Create a marker stamped with the current time.
    pub fn new(position: Point, color: Rgb, name: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            color,
            name: name.into(),
            desc: String::new(),
            create_time: timestamp::now_display(),
            update_time: String::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Name for lists and hover cards; falls back to the 1-based position
    /// when the user cleared the name.
    pub fn display_name(&self, index: usize) -> String {
        if self.name.is_empty() {
            generated_name(index as u64 + 1)
        } else {
            self.name.clone()
        }
    }

    pub fn was_edited(&self) -> bool {
        !self.update_time.is_empty()
    }
}

fn generated_name(number: u64) -> String {
    format!("{}{}", MARKER_NAME_PREFIX, number)
}

/// Parse the `N` out of a generated `标记N` name.
fn generated_number(name: &str) -> Option<u64> {
    name.strip_prefix(MARKER_NAME_PREFIX)?.parse().ok()
}

/// Ordered marker collection.
///
/// Indices are positions, not stable identities: removing index `k` shifts
/// every marker above `k` down by one, and callers holding indices must
/// re-resolve them after a removal.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    /// Number used for the next generated name; only ever grows until `clear`.
    next_number: u64,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_number: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Marker> + ExactSizeIterator {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    /// Name the next inserted marker will get.
    pub fn next_name(&self) -> String {
        generated_name(self.next_number)
    }

    /// Append a marker at an image-space position and return it.
    pub fn insert(&mut self, position: Point, color: Rgb) -> &Marker {
        let marker = Marker::new(position, color, self.next_name());
        self.next_number += 1;
        log::debug!(
            "Inserted marker '{}' at ({:.1}, {:.1})",
            marker.name,
            position.x,
            position.y
        );
        self.markers.push(marker);
        &self.markers[self.markers.len() - 1]
    }

    /// Update the editable fields of a marker and stamp its update time.
    ///
    /// Returns `false` without touching anything if `index` is out of range.
    pub fn edit(&mut self, index: usize, name: &str, desc: &str, color: Rgb) -> bool {
        let Some(marker) = self.markers.get_mut(index) else {
            log::debug!("Ignoring edit of missing marker {}", index);
            return false;
        };
        marker.name = name.trim().to_string();
        marker.desc = desc.trim().to_string();
        marker.color = color;
        marker.update_time = timestamp::now_display();
        true
    }

    /// Remove the marker at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Marker> {
        if index >= self.markers.len() {
            return None;
        }
        let removed = self.markers.remove(index);
        log::debug!("Removed marker '{}' (index {})", removed.name, index);
        Some(removed)
    }

    /// Drop every marker and restart name numbering.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.next_number = 1;
    }

    /// Replace the whole collection, e.g. on note import.
    ///
    /// Numbering continues past both the marker count and the highest
    /// generated name present, so later insertions never collide.
    pub fn replace_all(&mut self, markers: Vec<Marker>) {
        let highest = markers
            .iter()
            .filter_map(|m| generated_number(&m.name))
            .max()
            .unwrap_or(0);
        self.next_number = highest.max(markers.len() as u64) + 1;
        self.markers = markers;
    }
}

impl Default for MarkerStore {
    fn default() -> Self {
        Self::new()
    }
}
