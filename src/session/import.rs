//! Note import into a session.
//!
//! Importing replaces the whole marker collection; nothing is merged. A note
//! recorded for a different image only applies after explicit confirmation.

use crate::error::ViewerError;
use crate::format::NoteFile;
use crate::session::ViewerSession;

/// Details shown when asking the user to confirm a mismatched import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    /// `imageName` recorded in the note
    pub note_image: String,
    /// Name of the loaded image (empty if none)
    pub current_image: String,
}

impl From<NameMismatch> for ViewerError {
    fn from(m: NameMismatch) -> Self {
        ViewerError::NameMismatch {
            note_image: m.note_image,
            current_image: m.current_image,
        }
    }
}

/// Result of an import that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Markers replaced; carries the new marker count
    Applied(usize),
    /// User declined the name mismatch prompt; nothing changed
    Declined,
}

impl ViewerSession {
    fn name_mismatch(&self, note: &NoteFile) -> Option<NameMismatch> {
        let current = self.image().map(|i| i.name.as_str()).unwrap_or_default();
        (note.image_name != current).then(|| NameMismatch {
            note_image: note.image_name.clone(),
            current_image: current.to_string(),
        })
    }

    /// Import a note, asking `confirm` when it was made for another image.
    ///
    /// Declining leaves the session untouched.
    pub fn import_note(
        &mut self,
        note: NoteFile,
        confirm: impl FnOnce(&NameMismatch) -> bool,
    ) -> Result<ImportOutcome, ViewerError> {
        if let Some(mismatch) = self.name_mismatch(&note) {
            log::warn!(
                "Note image '{}' does not match loaded image '{}'",
                mismatch.note_image,
                mismatch.current_image
            );
            if !confirm(&mismatch) {
                log::info!("Import declined");
                return Ok(ImportOutcome::Declined);
            }
        }
        Ok(ImportOutcome::Applied(self.apply_note(note)))
    }

    /// Import a note, failing with [`ViewerError::NameMismatch`] instead of
    /// prompting when the image names differ.
    pub fn import_note_strict(&mut self, note: NoteFile) -> Result<usize, ViewerError> {
        if let Some(mismatch) = self.name_mismatch(&note) {
            return Err(mismatch.into());
        }
        Ok(self.apply_note(note))
    }

    /// Parse note JSON and import it, prompting through `confirm` on mismatch.
    ///
    /// Malformed input fails with [`ViewerError::Format`] and leaves the
    /// current markers untouched.
    pub fn import_note_json(
        &mut self,
        json: &str,
        confirm: impl FnOnce(&NameMismatch) -> bool,
    ) -> Result<ImportOutcome, ViewerError> {
        let note = NoteFile::parse(json)?;
        self.import_note(note, confirm)
    }

    fn apply_note(&mut self, note: NoteFile) -> usize {
        if let Some(mapping) = self.mapping() {
            let outside = note
                .markers
                .iter()
                .filter(|m| !mapping.contains_pixel(&m.position()))
                .count();
            if outside > 0 {
                log::warn!("{} imported markers lie outside the image bounds", outside);
            }
        }

        let count = note.markers.len();
        self.markers.replace_all(note.markers);
        self.selected = None;
        self.highlighted = None;
        self.edit_form.close();

        log::info!(
            "Imported {} markers from note for '{}'",
            count,
            note.image_name
        );
        count
    }
}
