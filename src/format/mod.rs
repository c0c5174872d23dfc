//! Note file import/export.
//!
//! Markers of one image are exported to a `<imageName>.note` JSON document
//! and imported back from it. See [`NoteFile`] for the layout.

mod error;
mod note;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use note::NoteFile;
