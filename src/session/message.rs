//! Viewer message types.
//!
//! All user input reaches the session as messages in the Elm architecture
//! style, handled one at a time by [`ViewerSession::update`](super::ViewerSession::update).

use crate::color::Rgb;
use crate::data::LoadedImage;
use crate::format::NoteFile;
use crate::geometry::Point;

/// Messages that can be sent to update viewer state.
#[derive(Debug, Clone)]
pub enum ViewerMessage {
    // Image
    /// A new image finished loading; resets view and markers
    ImageLoaded(LoadedImage),

    // Pointer
    /// Secondary (right) click: place a marker
    SecondaryClick(Point),
    /// Primary (left) click: open the edit form of the marker under the point
    PrimaryClick(Point),
    /// Primary button pressed: start a pan drag unless on a marker
    PrimaryDown(Point),
    /// Pointer moved: hover highlight and drag panning
    PointerMove(Point),
    /// Primary button released
    PrimaryUp,
    /// Pointer left the canvas
    PointerLeave,

    // View controls
    /// Zoom slider
    SetScale(f64),
    /// Rotation slider, degrees
    SetRotation(f64),
    /// Zoom in by the configured step
    ZoomIn,
    /// Zoom out by the configured step
    ZoomOut,
    /// Scale back to 1 and drop pan
    ResetZoom,
    /// Rotation back to 0
    ResetRotation,

    // Markers
    /// Color used for the next placed marker
    SetMarkerColor(Rgb),
    /// Open the edit form from the marker list
    SelectFromList(usize),
    /// Save the edit form for the selected marker
    SaveEdit {
        name: String,
        desc: String,
        color: Rgb,
    },
    /// Close the edit form without saving
    CloseEdit,
    /// Delete a marker from the list
    RemoveMarker(usize),

    // Notes
    /// Replace all markers from a note; `force` skips the image name check
    ImportNote { note: NoteFile, force: bool },
}
