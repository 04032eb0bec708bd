//! Point alias and the view→window affine transform.

use nalgebra::Vector2;

/// A point of the logical plane (or of the window, depending on context).
pub type Point = Vector2<f64>;

/// Affine map from view space to window space: `window = offset + scale * view`.
///
/// Invariant: `scale` is finite and strictly positive. Every mutator keeps it
/// inside `[min_scale, max_scale]`, so `to_view` never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    offset: Vector2<f64>,
    scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    #[inline]
    pub fn identity() -> Self {
        Self {
            offset: Vector2::zeros(),
            scale: 1.0,
        }
    }

    /// Build a transform; `None` when `scale` is zero, negative or not finite.
    pub fn new(offset: Vector2<f64>, scale: f64) -> Option<Self> {
        if scale.is_finite() && scale > 0.0 && offset.x.is_finite() && offset.y.is_finite() {
            Some(Self { offset, scale })
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn to_window(&self, p: Point) -> Point {
        self.offset + p * self.scale
    }

    #[inline]
    pub fn to_view(&self, w: Point) -> Point {
        (w - self.offset) / self.scale
    }

    /// Pan by a window-space delta.
    #[inline]
    pub fn translate(&mut self, d: Vector2<f64>) {
        if d.x.is_finite() && d.y.is_finite() {
            self.offset += d;
        }
    }

    /// Multiply the scale by `factor` keeping the view point under `anchor`
    /// (window space) fixed on screen.
    ///
    /// Non-positive or non-finite factors are ignored; the resulting scale is
    /// clamped to `[min_scale, max_scale]`.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64, min_scale: f64, max_scale: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let pinned = self.to_view(anchor);
        self.scale = (self.scale * factor).clamp(min_scale, max_scale);
        self.offset = anchor - pinned * self.scale;
    }
}
