//! Image pixel <-> screen point mapping.
//!
//! The image is centered in a fixed-size viewport, then visually transformed
//! about its own center as `translate(t) scale(s) rotate(θ)`:
//!
//! ```text
//! screen = center + t + s · R(θ) · (base - center)
//! base   = offset + pixel · (display / natural)
//! ```
//!
//! Every consumer (rendering, hit-testing, marker placement) goes through
//! [`ViewMapping::forward`] or its exact inverse, so markers cannot drift
//! from the image content.

use crate::geometry::{Point, Size};
use crate::view::ViewState;

/// Layout of a loaded image inside the viewport.
///
/// Only constructible from valid (finite, positive) sizes, so holding one
/// means both mapping directions are defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMapping {
    natural: Size,
    display: Size,
    viewport: Size,
}

impl ViewMapping {
    /// Returns `None` if the natural or display size is zero/invalid, i.e. no
    /// image is effectively loaded.
    pub fn new(natural: Size, display: Size, viewport: Size) -> Option<Self> {
        let viewport_finite = viewport.width.is_finite() && viewport.height.is_finite();
        if !natural.is_valid() || !display.is_valid() || !viewport_finite {
            return None;
        }
        Some(Self {
            natural,
            display,
            viewport,
        })
    }

    pub fn natural(&self) -> Size {
        self.natural
    }

    pub fn display(&self) -> Size {
        self.display
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Top-left corner of the untransformed image inside the viewport.
    pub fn offset(&self) -> Point {
        Point::new(
            (self.viewport.width - self.display.width) / 2.0,
            (self.viewport.height - self.display.height) / 2.0,
        )
    }

    /// Visual center of the image, the pivot of rotation and scale.
    pub fn center(&self) -> Point {
        let offset = self.offset();
        Point::new(
            offset.x + self.display.width / 2.0,
            offset.y + self.display.height / 2.0,
        )
    }

    /// Display pixels per natural pixel, per axis.
    fn ratio(&self) -> (f64, f64) {
        (
            self.display.width / self.natural.width,
            self.display.height / self.natural.height,
        )
    }

    /// Screen position of a natural pixel before pan/zoom/rotate.
    pub fn base_point(&self, pixel: Point) -> Point {
        let (rx, ry) = self.ratio();
        let offset = self.offset();
        Point::new(pixel.x * rx + offset.x, pixel.y * ry + offset.y)
    }

    /// Natural image pixel -> screen point.
    pub fn forward(&self, view: &ViewState, pixel: Point) -> Point {
        let center = self.center();
        self.base_point(pixel)
            .sub(&center)
            .rotate_deg(view.rotation())
            .scale(view.scale())
            .offset(view.translate_x, view.translate_y)
            .add(&center)
    }

    /// Screen point -> natural image pixel. Exact inverse of [`forward`](Self::forward).
    pub fn inverse(&self, view: &ViewState, screen: Point) -> Point {
        let center = self.center();
        let offset = self.offset();
        let (rx, ry) = self.ratio();

        let unrotated = screen
            .offset(-view.translate_x, -view.translate_y)
            .sub(&center)
            .scale(1.0 / view.scale())
            .rotate_deg(-view.rotation())
            .add(&center)
            .sub(&offset);

        Point::new(unrotated.x / rx, unrotated.y / ry)
    }

    /// Whether a natural pixel lies on the image.
    pub fn contains_pixel(&self, pixel: &Point) -> bool {
        self.natural.contains(pixel)
    }
}
