//! Transient interaction state.
//!
//! Drag tracking and the shared marker edit form. None of this is persisted;
//! it is reset whenever a new image loads.

use crate::color::Rgb;
use crate::geometry::Point;
use crate::model::Marker;

/// Pan drag tracking.
///
/// Move events only pan between a `start` and an `end`; anything arriving
/// outside that window is ignored.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether the image is currently being dragged
    pub is_dragging: bool,
    /// Last drag position for calculating delta
    pub last_pos: Option<Point>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag operation.
    pub fn start(&mut self, pos: Point) {
        self.is_dragging = true;
        self.last_pos = Some(pos);
    }

    /// Update drag position and return the delta.
    pub fn update(&mut self, pos: Point) -> Option<(f64, f64)> {
        if !self.is_dragging {
            return None;
        }
        let last = self.last_pos.replace(pos)?;
        Some((pos.x - last.x, pos.y - last.y))
    }

    /// End the drag operation.
    pub fn end(&mut self) {
        self.is_dragging = false;
        self.last_pos = None;
    }
}

/// The single edit form shared by all markers.
///
/// Opening it for another marker overwrites whatever was typed before.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub open: bool,
    pub name: String,
    pub desc: String,
    pub color: Rgb,
}

impl EditForm {
    pub fn new() -> Self {
        Self {
            open: false,
            name: String::new(),
            desc: String::new(),
            color: Rgb::RED,
        }
    }

    /// Fill the fields from a marker and open the form.
    pub fn open_for(&mut self, marker: &Marker) {
        self.name = marker.name.clone();
        self.desc = marker.desc.clone();
        self.color = marker.color;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

impl Default for EditForm {
    fn default() -> Self {
        Self::new()
    }
}
