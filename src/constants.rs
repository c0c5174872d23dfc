//! Global constants for the medmark viewer

/// Fixed logical viewport (canvas) width in pixels
pub const VIEWPORT_WIDTH: f64 = 1200.0;

/// Fixed logical viewport (canvas) height in pixels
pub const VIEWPORT_HEIGHT: f64 = 1200.0;

/// Marker hit radius in unscaled screen pixels, divided by the current scale at query time
pub const HIT_RADIUS: f64 = 20.0;

/// Base drawing size of a marker glyph
pub const MARKER_SIZE: f64 = 12.0;

/// Size multiplier applied to the hovered marker
pub const HIGHLIGHT_FACTOR: f64 = 1.5;

/// Zoom limits and step
pub mod zoom {
    /// Smallest allowed scale; keeps the inverse mapping defined
    pub const MIN: f64 = 0.1;
    /// Largest allowed scale
    pub const MAX: f64 = 10.0;
    /// Multiplicative step for zoom in/out
    pub const FACTOR: f64 = 1.2;
}

/// Default marker color for new markers
pub const DEFAULT_MARKER_COLOR: &str = "#ff0000";

/// Prefix of generated marker names ("标记1", "标记2", ...)
pub const MARKER_NAME_PREFIX: &str = "标记";

/// Hover card placeholders
pub mod hover {
    /// Shown when a marker has no description
    pub const NO_DESCRIPTION: &str = "无描述";
    /// Shown when a marker was never edited
    pub const NEVER_UPDATED: &str = "无";
    /// Gap between cursor and card
    pub const CURSOR_GAP: f64 = 10.0;
    /// Offset below the cursor when the card would leave the top edge
    pub const BELOW_CURSOR: f64 = 20.0;
}

/// File extension of exported note files
pub const NOTE_EXTENSION: &str = "note";

/// Current note file format version
pub const NOTE_VERSION: u32 = 1;
