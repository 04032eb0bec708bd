//! Planar geometry kernel (pure functions, no viewer state).
//!
//! Purpose
//! - Circle-inversion maps applied to whole point sets once per frame.
//! - Orientation predicate and Andrew's monotone-chain hull on the image set.
//! - The affine view↔window transform used by hit-testing and drawing.
//!
//! Conventions
//! - Points live in "view space"; `ViewTransform` maps them to pixels.
//! - `signed_area > 0` means a counter-clockwise turn.

mod hull;
mod inversion;
mod types;

pub use hull::{convex_hull, signed_area, Hull};
pub(crate) use hull::convex_hull_into;
pub use inversion::{invert, invert_all, InversionMap, InversionParams};
pub use types::{Point, ViewTransform};
