//! View transform: pan/zoom/rotate state and the image <-> screen mapping.

mod mapping;
mod transform;

pub use mapping::ViewMapping;
pub use transform::{ScaleLimits, ViewState};
