//! medmark - point annotations for medical images
//!
//! The coordinate and interaction core of an image viewer that lets users drop
//! named, colored point markers on an image while freely zooming, rotating and
//! panning it. Markers live in natural image pixels; [`ViewMapping`] maps them
//! to and from screen space, and [`ViewerSession`] turns pointer input into
//! marker edits. Marker sets are saved as `.note` JSON files.

pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod geometry;
pub mod model;
pub mod render;
pub mod session;
pub mod timestamp;
pub mod view;

pub use color::Rgb;
pub use config::{ConfigError, ViewerConfig};
pub use data::LoadedImage;
pub use error::ViewerError;
pub use format::{FormatError, NoteFile};
pub use geometry::{Point, Size};
pub use model::{HitTester, Marker, MarkerStore};
pub use render::{DrawList, HoverCard, MarkerGlyph, Renderer};
pub use session::{ImportOutcome, NameMismatch, ViewerMessage, ViewerSession};
pub use view::{ScaleLimits, ViewMapping, ViewState};
