//! Interactive viewer core for planar point sets under a circle-inversion map.
//!
//! Layers, leaves first:
//! - `geom`: inversion map, orientation test, monotone-chain hull, view transform.
//! - `raster`: RGB canvas with clipped pixel, segment, circle and disk primitives.
//! - `viewer`: session state, input handling and the per-frame paint.
//! - `host`: the window/event-loop seam (`Window`, `EventHandler`, `EventSource`).
//! - `points`: point-set parsing and small point-cloud generators.
//!
//! API Policy
//! - The library has no windowing backend of its own. A host drives it through
//!   `host::EventSource` and receives finished frames via `present`.

pub mod geom;
pub mod host;
pub mod points;
pub mod raster;
pub mod viewer;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::Point;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        convex_hull, invert, signed_area, Hull, InversionMap, InversionParams, Point,
        ViewTransform,
    };
    pub use crate::host::{Event, EventHandler, EventSource, ScriptedSource, Session, Window};
    pub use crate::points::{parse_points, read_points, PointsError};
    pub use crate::raster::{Canvas, Rgb};
    pub use crate::viewer::{
        Button, ButtonAction, ButtonMask, DragState, Key, Modifiers, Viewer, ViewerCfg,
        ViewerState,
    };
}
