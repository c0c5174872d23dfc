//! Unit tests for the viewer session.
//!
//! Scenario tests walk through complete user flows; the other files cover
//! pointer interaction and note import one behavior at a time.

mod import_tests;

use crate::data::LoadedImage;
use crate::geometry::{Point, Size};
use crate::session::ViewerSession;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// 800x600 image shown at natural size in the default 1200x1200 viewport.
///
/// The image sits at screen offset (200, 300) with its center at (600, 600).
fn scan_image(name: &str) -> LoadedImage {
    LoadedImage::new(name, Size::new(800.0, 600.0), Size::new(800.0, 600.0))
}

fn loaded_session() -> ViewerSession {
    let mut session = ViewerSession::default();
    session.load_image(scan_image("scan")).unwrap();
    session
}
