//! Pan/zoom/rotate view state.
//!
//! The state is the single source of truth for how the displayed image is
//! visually transformed. Rendering, hit-testing and marker placement all read
//! it through [`ViewMapping`](super::ViewMapping).

use crate::constants::zoom as zoom_const;

/// Scale range a [`ViewState`] is clamped to.
///
/// Always `0 < min <= max < inf`; [`ScaleLimits::new`] repairs anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    min: f64,
    max: f64,
}

impl ScaleLimits {
    /// Build a range, replacing a non-positive or non-finite bound with the
    /// default and raising `max` to `min` when they are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        let sane_min = if min.is_finite() && min > 0.0 {
            min
        } else {
            zoom_const::MIN
        };
        let sane_max = if max.is_finite() { max } else { zoom_const::MAX };
        let sane_max = sane_max.max(sane_min);

        if sane_min != min || sane_max != max {
            log::warn!(
                "Scale limits [{}, {}] unusable, using [{}, {}]",
                min,
                max,
                sane_min,
                sane_max
            );
        }
        Self {
            min: sane_min,
            max: sane_max,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `scale` into range. NaN falls back to the minimum so the inverse
    /// mapping never divides by zero or NaN.
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::new(zoom_const::MIN, zoom_const::MAX)
    }
}

/// Current scale, rotation and translation of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    scale: f64,
    /// Degrees, unnormalized.
    rotation: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    limits: ScaleLimits,
}

impl ViewState {
    /// Create a view state; `scale` is clamped to the default limits.
    pub fn new(scale: f64, rotation: f64, translate_x: f64, translate_y: f64) -> Self {
        Self::with_limits(ScaleLimits::default()).with(scale, rotation, translate_x, translate_y)
    }

    /// Identity transform with custom scale limits.
    pub fn with_limits(limits: ScaleLimits) -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            limits,
        }
    }

    /// Identity transform (scale 1, no rotation, no pan).
    pub fn identity() -> Self {
        Self::with_limits(ScaleLimits::default())
    }

    fn with(mut self, scale: f64, rotation: f64, translate_x: f64, translate_y: f64) -> Self {
        self.set_scale(scale);
        self.set_rotation(rotation);
        self.translate_x = translate_x;
        self.translate_y = translate_y;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation folded into `[0, 360)` for display.
    pub fn normalized_rotation(&self) -> f64 {
        let r = self.rotation.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if r >= 360.0 { 0.0 } else { r }
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.limits.clamp(scale);
    }

    /// Non-finite angles are ignored.
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees;
        }
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.set_rotation(self.rotation + degrees);
    }

    /// Apply a pan delta in screen pixels. Non-finite deltas are ignored.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Zoom in by a factor (e.g., 1.2 for 20% zoom in), clamped to the max.
    pub fn zoom_in(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Zoom out by a factor, clamped to the min.
    pub fn zoom_out(&mut self, factor: f64) {
        self.set_scale(self.scale / factor);
    }

    /// Scale back to 1 and drop any pan.
    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = 0.0;
    }

    /// Back to identity, keeping the configured limits.
    pub fn reset(&mut self) {
        self.reset_zoom();
        self.reset_rotation();
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::identity()
    }
}
