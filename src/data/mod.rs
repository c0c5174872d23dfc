//! Image data handling for medmark.
//!
//! Only image metadata lives here; pixels are the host's business.

mod loader;

pub use loader::{LoadedImage, image_base_name};
