//! Circle-inversion maps.
//!
//! `Flip` is the Katz–Leifman–Tal "flip" map: a point at distance `r` from the
//! pole is moved radially by `2(R - r)`, i.e. reflected across the circle of
//! radius `R` along its ray. It is not an involution.
//! `Classic` is the conformal inversion `c + R²(p - c)/r²`.

use serde::{Deserialize, Serialize};

use super::types::Point;

/// Which inversion formula to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InversionMap {
    #[default]
    Flip,
    Classic,
}

/// Pole and radius of the inversion circle.
///
/// Invariant: `radius > 0`, maintained by `scale_radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InversionParams {
    pub center: Point,
    pub radius: f64,
}

impl InversionParams {
    #[inline]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Multiply the radius by `factor`, never letting it drop below `min_radius`.
    pub fn scale_radius(&mut self, factor: f64, min_radius: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let r = self.radius * factor;
        self.radius = if r.is_finite() { r.max(min_radius) } else { self.radius };
    }
}

/// Image of `p` under `map` with pole `c` and radius `big_r`.
///
/// A point on the pole (or at non-finite distance from it) is returned unchanged.
#[inline]
pub fn invert(map: InversionMap, c: Point, big_r: f64, p: Point) -> Point {
    let d = p - c;
    let r = d.norm();
    if r == 0.0 || !r.is_finite() {
        return p;
    }
    match map {
        InversionMap::Flip => p + d * (2.0 * (big_r - r) / r),
        InversionMap::Classic => c + d * (big_r * big_r / (r * r)),
    }
}

/// Invert every point of `src` into `dst` (cleared first, capacity reused).
pub fn invert_all(map: InversionMap, params: &InversionParams, src: &[Point], dst: &mut Vec<Point>) {
    dst.clear();
    dst.extend(
        src.iter()
            .map(|&p| invert(map, params.center, params.radius, p)),
    );
}
