//! Note import: name checks, replacement and failure atomicity.

use std::cell::Cell;

use super::loaded_session;
use crate::color::Rgb;
use crate::error::ViewerError;
use crate::format::NoteFile;
use crate::geometry::Point;
use crate::model::Marker;
use crate::session::{ImportOutcome, ViewerMessage, ViewerSession};

fn note_for(image: &str, count: usize) -> NoteFile {
    let markers = (0..count)
        .map(|i| {
            Marker::new(
                Point::new(50.0 + i as f64 * 100.0, 80.0),
                Rgb::new(0, 200, 0),
                format!("标记{}", i + 1),
            )
        })
        .collect();
    NoteFile::new(image, markers)
}

fn session_with_one_marker() -> ViewerSession {
    let mut session = loaded_session();
    session.place_marker(Point::new(400.0, 400.0)).unwrap();
    session
}

#[test]
fn test_matching_note_replaces_markers() {
    let mut session = session_with_one_marker();
    let asked = Cell::new(false);

    let outcome = session
        .import_note(note_for("scan", 3), |_| {
            asked.set(true);
            false
        })
        .unwrap();

    assert_eq!(outcome, ImportOutcome::Applied(3));
    assert!(!asked.get());
    assert_eq!(session.markers().len(), 3);
    assert!(session.markers().iter().all(|m| m.color == Rgb::new(0, 200, 0)));
    assert_eq!(session.markers().next_name(), "标记4");
}

#[test]
fn test_mismatch_declined_keeps_state() {
    let mut session = session_with_one_marker();
    let before = session.markers().as_slice().to_vec();

    let outcome = session
        .import_note(note_for("other_scan", 2), |mismatch| {
            assert_eq!(mismatch.note_image, "other_scan");
            assert_eq!(mismatch.current_image, "scan");
            false
        })
        .unwrap();

    assert_eq!(outcome, ImportOutcome::Declined);
    assert_eq!(session.markers().as_slice(), before.as_slice());
}

#[test]
fn test_mismatch_confirmed_applies() {
    let mut session = session_with_one_marker();
    let outcome = session
        .import_note(note_for("other_scan", 2), |_| true)
        .unwrap();
    assert_eq!(outcome, ImportOutcome::Applied(2));
    assert_eq!(session.markers().len(), 2);
    // The loaded image keeps its own name
    assert_eq!(session.image().unwrap().name, "scan");
}

#[test]
fn test_strict_import_reports_mismatch() {
    let mut session = session_with_one_marker();
    let err = session
        .import_note_strict(note_for("other_scan", 2))
        .unwrap_err();
    match err {
        ViewerError::NameMismatch {
            note_image,
            current_image,
        } => {
            assert_eq!(note_image, "other_scan");
            assert_eq!(current_image, "scan");
        }
        other => panic!("expected NameMismatch, got {:?}", other),
    }
    assert_eq!(session.markers().len(), 1);
}

#[test]
fn test_import_message_force_flag() {
    let mut session = session_with_one_marker();
    let err = session
        .update(ViewerMessage::ImportNote {
            note: note_for("other_scan", 2),
            force: false,
        })
        .unwrap_err();
    assert!(matches!(err, ViewerError::NameMismatch { .. }));
    assert_eq!(session.markers().len(), 1);

    session
        .update(ViewerMessage::ImportNote {
            note: note_for("other_scan", 2),
            force: true,
        })
        .unwrap();
    assert_eq!(session.markers().len(), 2);
}

#[test]
fn test_import_without_image_is_a_mismatch() {
    let mut session = ViewerSession::default();
    let err = session.import_note_strict(note_for("scan", 1)).unwrap_err();
    match err {
        ViewerError::NameMismatch { current_image, .. } => assert!(current_image.is_empty()),
        other => panic!("expected NameMismatch, got {:?}", other),
    }
    assert!(session.markers().is_empty());
}

#[test]
fn test_malformed_json_leaves_markers() {
    let mut session = session_with_one_marker();
    let before = session.markers().as_slice().to_vec();

    for json in [
        "not json",
        r#"{"markers": []}"#,
        r#"{"imageName": "scan", "markers": "none"}"#,
        r#"{"imageName": "scan", "markers": [{"x": 1}]}"#,
    ] {
        let err = session.import_note_json(json, |_| true).unwrap_err();
        assert!(matches!(err, ViewerError::Format(_)), "{}", json);
        assert_eq!(session.markers().as_slice(), before.as_slice());
    }
}

#[test]
fn test_import_json_applies() {
    let mut session = loaded_session();
    let json = r##"{
        "version": 1,
        "imageName": "scan",
        "createTime": "2026-10-17T08:00:00Z",
        "markers": [
            {"x": 10.5, "y": 20.0, "color": "#00ff00", "name": "病灶", "desc": "", "createTime": "2026-10-17 08:00:00", "updateTime": ""}
        ]
    }"##;

    let outcome = session.import_note_json(json, |_| false).unwrap();
    assert_eq!(outcome, ImportOutcome::Applied(1));
    let marker = session.markers().get(0).unwrap();
    assert_eq!(marker.name, "病灶");
    assert_eq!(marker.position(), Point::new(10.5, 20.0));
    assert_eq!(marker.color, Rgb::new(0, 255, 0));
    assert_eq!(session.markers().next_name(), "标记2");
}

#[test]
fn test_import_clears_selection_and_hover() {
    let mut session = session_with_one_marker();
    session.open_edit(0);
    session.pointer_move(Point::new(400.0, 400.0));
    assert_eq!(session.highlighted(), Some(0));

    session.import_note_strict(note_for("scan", 2)).unwrap();
    assert_eq!(session.selected(), None);
    assert_eq!(session.highlighted(), None);
    assert!(!session.edit_form().open);
}

#[test]
fn test_out_of_bounds_markers_are_kept() {
    let mut session = loaded_session();
    let mut note = note_for("scan", 1);
    note.markers[0].x = 5000.0;
    assert_eq!(session.import_note_strict(note).unwrap(), 1);
    assert_eq!(session.markers().get(0).unwrap().x, 5000.0);
}
