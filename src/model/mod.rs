//! Data models for medmark.

mod marker;

pub use hit_test::HitTester;
pub use marker::{Marker, MarkerStore};
