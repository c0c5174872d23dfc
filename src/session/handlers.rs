//! Message handling for the viewer session.
//!
//! Pointer handlers are safe against bursts of events: move events only pan
//! while a drag is active, and hover state is recomputed from scratch on
//! every move.

use crate::error::ViewerError;
use crate::geometry::Point;
use crate::session::{ViewerMessage, ViewerSession};

/// Movement below this many pixels does not count as a drag step.
const DRAG_MOVEMENT_THRESHOLD: f64 = 0.01;

impl ViewerSession {
    /// Apply one message.
    ///
    /// Errors are meant for the user (a notice or a confirmation prompt); the
    /// session is unchanged whenever an error is returned.
    pub fn update(&mut self, message: ViewerMessage) -> Result<(), ViewerError> {
        match message {
            ViewerMessage::ImageLoaded(image) => self.load_image(image)?,
            ViewerMessage::SecondaryClick(pos) => {
                self.place_marker(pos)?;
            }
            ViewerMessage::PrimaryClick(pos) => {
                self.primary_click(pos)?;
            }
            ViewerMessage::PrimaryDown(pos) => self.pointer_down(pos),
            ViewerMessage::PointerMove(pos) => self.pointer_move(pos),
            ViewerMessage::PrimaryUp => self.pointer_up(),
            ViewerMessage::PointerLeave => self.pointer_leave(),
            ViewerMessage::SetScale(scale) => self.set_scale(scale),
            ViewerMessage::SetRotation(degrees) => self.set_rotation(degrees),
            ViewerMessage::ZoomIn => self.zoom_in(),
            ViewerMessage::ZoomOut => self.zoom_out(),
            ViewerMessage::ResetZoom => self.reset_zoom(),
            ViewerMessage::ResetRotation => self.reset_rotation(),
            ViewerMessage::SetMarkerColor(color) => self.set_marker_color(color),
            ViewerMessage::SelectFromList(index) => {
                self.open_edit(index);
            }
            ViewerMessage::SaveEdit { name, desc, color } => {
                self.save_edit(&name, &desc, color);
            }
            ViewerMessage::CloseEdit => self.close_edit(),
            ViewerMessage::RemoveMarker(index) => {
                self.remove_marker(index);
            }
            ViewerMessage::ImportNote { note, force } => {
                if force {
                    self.import_note(note, |_| true)?;
                } else {
                    self.import_note_strict(note)?;
                }
            }
        }
        Ok(())
    }

    /// Open the edit form of the marker under `pos`, if any.
    pub fn primary_click(&mut self, pos: Point) -> Result<Option<usize>, ViewerError> {
        let hit = self.hit_test(pos)?;
        match hit {
            Some(index) => {
                log::debug!("Clicked marker {}", index);
                self.open_edit(index);
            }
            None => log::trace!("Click at ({:.1}, {:.1}) hit no marker", pos.x, pos.y),
        }
        Ok(hit)
    }

    /// Start panning, unless the press lands on a marker (that is a click).
    pub fn pointer_down(&mut self, pos: Point) {
        if let Ok(Some(index)) = self.hit_test(pos) {
            log::trace!("Press on marker {}; not starting drag", index);
            return;
        }
        self.drag.start(pos);
        log::debug!("Pan drag started at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Update hover highlight and pan if a drag is active.
    pub fn pointer_move(&mut self, pos: Point) {
        let hovered = self.hit_test(pos).ok().flatten();
        if hovered != self.highlighted {
            self.highlighted = hovered;
            log::trace!("Highlight: {:?}", hovered);
        }

        if let Some((dx, dy)) = self.drag.update(pos) {
            // Only update if there's meaningful movement
            if dx.abs() > DRAG_MOVEMENT_THRESHOLD || dy.abs() > DRAG_MOVEMENT_THRESHOLD {
                self.view.pan_by(dx, dy);
                log::debug!(
                    "Panning: delta({:.1}, {:.1}) -> pan({:.1}, {:.1})",
                    dx,
                    dy,
                    self.view.translate_x,
                    self.view.translate_y
                );
            }
        }
    }

    pub fn pointer_up(&mut self) {
        if self.drag.is_dragging {
            self.drag.end();
            log::debug!("Pan drag ended");
        }
    }

    /// Pointer left the canvas: abandon any drag and drop the hover.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
        self.highlighted = None;
    }
}
