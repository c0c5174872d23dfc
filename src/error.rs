//! Errors surfaced to the user by the viewer session.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;

/// Errors raised where user input is accepted.
///
/// A failed operation never changes session state.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Marker placement, hit-testing or export with nothing displayed
    #[error("No image loaded; open an image first")]
    NoImageLoaded,

    /// Secondary click that maps outside the image
    #[error("Point ({x:.1}, {y:.1}) is outside the image")]
    OutsideImage {
        /// Image-space x of the rejected point
        x: f64,
        /// Image-space y of the rejected point
        y: f64,
    },

    /// Malformed note file
    #[error("Note file could not be parsed: {0}")]
    Format(#[from] FormatError),

    /// Note was made for a different image
    #[error("Note belongs to image '{note_image}', but '{current_image}' is loaded")]
    NameMismatch {
        /// `imageName` recorded in the note
        note_image: String,
        /// Name of the loaded image (empty if none)
        current_image: String,
    },

    /// Image file whose dimensions could not be read
    #[error("Cannot read image {path:?}: {message}")]
    InvalidImage {
        /// Path that was probed
        path: PathBuf,
        /// Underlying decoder message
        message: String,
    },
}
