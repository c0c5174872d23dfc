//! Viewer session: the single owner of view and marker state.
//!
//! A [`ViewerSession`] holds everything one viewer window needs: the loaded
//! image, its [`ViewState`], the [`MarkerStore`], and the transient
//! selection/hover/drag/edit state. Hosts feed it [`ViewerMessage`]s from
//! their event loop and read its state back for drawing.
//!
//! Interaction states per marker:
//!
//! ```text
//! Idle --secondary click on image--> MarkerCreated --> Idle
//! Idle --primary click on marker---> Editing --save/close--> Idle
//! ```

mod handlers;
mod import;
mod message;
mod widget_state;

#[cfg(test)]
mod tests;

pub use import::{ImportOutcome, NameMismatch};
pub use message::ViewerMessage;
pub use widget_state::{DragState, EditForm};

use std::path::PathBuf;

use crate::color::Rgb;
use crate::config::ViewerConfig;
use crate::data::LoadedImage;
use crate::error::ViewerError;
use crate::format::NoteFile;
use crate::geometry::Point;
use crate::model::{HitTester, Marker, MarkerStore};
use crate::view::{ViewMapping, ViewState};

/// State of one viewer: image, view transform, markers and UI state.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    config: ViewerConfig,
    view: ViewState,
    markers: MarkerStore,
    image: Option<LoadedImage>,
    /// Marker whose edit form is open
    selected: Option<usize>,
    /// Marker under the pointer
    highlighted: Option<usize>,
    drag: DragState,
    edit_form: EditForm,
    /// Color for newly placed markers
    marker_color: Rgb,
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let view = ViewState::with_limits(config.scale_limits());
        let marker_color = config.default_marker_color;
        Self {
            config,
            view,
            markers: MarkerStore::new(),
            image: None,
            selected: None,
            highlighted: None,
            drag: DragState::new(),
            edit_form: EditForm::new(),
            marker_color,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    pub fn edit_form(&self) -> &EditForm {
        &self.edit_form
    }

    /// Hosts write the form fields here while the user types.
    pub fn edit_form_mut(&mut self) -> &mut EditForm {
        &mut self.edit_form
    }

    pub fn marker_color(&self) -> Rgb {
        self.marker_color
    }

    pub fn set_marker_color(&mut self, color: Rgb) {
        self.marker_color = color;
    }

    // ========================================================================
    // Image & mapping
    // ========================================================================

    /// Show a new image. Resets the view and drops every marker and all
    /// transient state.
    pub fn load_image(&mut self, image: LoadedImage) -> Result<(), ViewerError> {
        if !image.is_valid() {
            return Err(ViewerError::InvalidImage {
                path: PathBuf::from(&image.name),
                message: format!(
                    "unusable size {}x{} (displayed {}x{})",
                    image.natural.width,
                    image.natural.height,
                    image.display.width,
                    image.display.height
                ),
            });
        }

        log::info!(
            "Loaded image '{}' ({}x{})",
            image.name,
            image.natural.width,
            image.natural.height
        );
        self.image = Some(image);
        self.view.reset();
        self.markers.clear();
        self.reset_transient_state();
        Ok(())
    }

    fn reset_transient_state(&mut self) {
        self.selected = None;
        self.highlighted = None;
        self.drag.end();
        self.edit_form.close();
    }

    /// Mapping for the loaded image, or `None` when nothing is shown.
    pub fn mapping(&self) -> Option<ViewMapping> {
        let image = self.image.as_ref()?;
        ViewMapping::new(image.natural, image.display, self.config.viewport_size())
    }

    fn require_mapping(&self) -> Result<ViewMapping, ViewerError> {
        self.mapping().ok_or(ViewerError::NoImageLoaded)
    }

    /// Natural image pixel -> screen point under the current view.
    pub fn image_to_screen(&self, pixel: Point) -> Result<Point, ViewerError> {
        Ok(self.require_mapping()?.forward(&self.view, pixel))
    }

    /// Screen point -> natural image pixel under the current view.
    pub fn screen_to_image(&self, screen: Point) -> Result<Point, ViewerError> {
        Ok(self.require_mapping()?.inverse(&self.view, screen))
    }

    // ========================================================================
    // View controls
    // ========================================================================

    pub fn set_scale(&mut self, scale: f64) {
        self.view.set_scale(scale);
        log::debug!("Zoom: {:.2}x", self.view.scale());
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.view.set_rotation(degrees);
        log::debug!("Rotation: {:.1}°", self.view.normalized_rotation());
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in(self.config.zoom_factor);
        log::debug!("Zoom in: {:.2}x", self.view.scale());
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out(self.config.zoom_factor);
        log::debug!("Zoom out: {:.2}x", self.view.scale());
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
        log::debug!("Zoom reset");
    }

    pub fn reset_rotation(&mut self) {
        self.view.reset_rotation();
        log::debug!("Rotation reset");
    }

    // ========================================================================
    // Markers
    // ========================================================================

    /// Index of the topmost marker under a screen point.
    pub fn hit_test(&self, screen: Point) -> Result<Option<usize>, ViewerError> {
        let mapping = self.require_mapping()?;
        let tester = HitTester::new(&mapping, &self.view, self.config.hit_radius);
        Ok(tester.hit_test(self.markers.as_slice(), screen))
    }

    /// Place a marker where the user secondary-clicked and return its index.
    pub fn place_marker(&mut self, screen: Point) -> Result<usize, ViewerError> {
        let mapping = self.require_mapping()?;
        let pixel = mapping.inverse(&self.view, screen);
        if !mapping.contains_pixel(&pixel) {
            log::debug!(
                "Click at ({:.1}, {:.1}) maps outside the image: ({:.1}, {:.1})",
                screen.x,
                screen.y,
                pixel.x,
                pixel.y
            );
            return Err(ViewerError::OutsideImage {
                x: pixel.x,
                y: pixel.y,
            });
        }

        let marker = self.markers.insert(pixel, self.marker_color);
        log::info!(
            "Created marker '{}' at ({:.1}, {:.1})",
            marker.name,
            pixel.x,
            pixel.y
        );
        Ok(self.markers.len() - 1)
    }

    /// Select a marker and open the edit form on it.
    ///
    /// Any unsaved input for a previously selected marker is discarded.
    pub fn open_edit(&mut self, index: usize) -> bool {
        let Some(marker) = self.markers.get(index) else {
            return false;
        };
        self.edit_form.open_for(marker);
        self.selected = Some(index);
        log::debug!("Editing marker {} ('{}')", index, marker.name);
        true
    }

    /// Save the edit form fields onto the selected marker and close the form.
    ///
    /// No-op (returns `false`) when nothing is selected.
    pub fn save_edit(&mut self, name: &str, desc: &str, color: Rgb) -> bool {
        let Some(index) = self.selected else {
            log::debug!("Save ignored: no marker selected");
            return false;
        };
        if !self.markers.edit(index, name, desc, color) {
            return false;
        }
        log::info!("Updated marker {}", index);
        self.close_edit();
        true
    }

    /// Close the edit form without saving.
    pub fn close_edit(&mut self) {
        self.edit_form.close();
        self.selected = None;
    }

    /// Delete a marker and re-resolve the selected/highlighted indices.
    pub fn remove_marker(&mut self, index: usize) -> Option<Marker> {
        let removed = self.markers.remove(index)?;

        let selected = self.selected;
        match selected {
            Some(s) if s == index => self.close_edit(),
            Some(s) if s > index => self.selected = Some(s - 1),
            _ => {}
        }
        self.highlighted = match self.highlighted {
            Some(h) if h == index => None,
            Some(h) if h > index => Some(h - 1),
            other => other,
        };

        log::info!("Deleted marker '{}'", removed.name);
        Some(removed)
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Snapshot the current markers as a note for the loaded image.
    pub fn export_note(&self) -> Result<NoteFile, ViewerError> {
        let image = self.image.as_ref().ok_or(ViewerError::NoImageLoaded)?;
        let note = NoteFile::new(image.name.clone(), self.markers.as_slice().to_vec());
        log::info!(
            "Exported note for '{}' with {} markers",
            note.image_name,
            note.markers.len()
        );
        Ok(note)
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
