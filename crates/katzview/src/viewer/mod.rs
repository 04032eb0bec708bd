//! Viewer session: state, input handling and painting.
//!
//! - `ViewerState`: the mutable session (points, view, inversion circle, drag, flags).
//! - `controller`: `EventHandler` impl turning host events into state changes.
//! - `render`: the per-frame paint pipeline.
//! - `ViewerCfg`: interaction and drawing constants.

mod cfg;
mod controller;
mod input;
mod render;
mod state;

pub use cfg::{CfgError, ViewerCfg};
pub use controller::{key_action, Action, Step};
pub use input::{Button, ButtonAction, ButtonMask, Key, Modifiers};
pub use render::FrameCache;
pub use state::{DisplayOptions, DragState, InterpolationOrder, ViewerState};

use crate::geom::{Hull, Point};

/// A viewer session bound to its configuration; implements `host::EventHandler`.
#[derive(Clone, Debug)]
pub struct Viewer {
    state: ViewerState,
    cfg: ViewerCfg,
    cache: FrameCache,
}

impl Viewer {
    /// Start a session on `points` with default view and inversion circle.
    pub fn new(points: Vec<Point>, cfg: ViewerCfg) -> Result<Self, CfgError> {
        cfg.validate()?;
        tracing::info!(n = points.len(), "viewer initialized");
        Ok(Self {
            state: ViewerState::new(points, &cfg),
            cfg,
            cache: FrameCache::default(),
        })
    }

    #[inline]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    #[inline]
    pub fn cfg(&self) -> &ViewerCfg {
        &self.cfg
    }

    /// Inverted point set from the last paint.
    #[inline]
    pub fn inverted(&self) -> &[Point] {
        &self.cache.inverted
    }

    /// Hull of the inverted set from the last paint.
    #[inline]
    pub fn hull(&self) -> &Hull {
        &self.cache.hull
    }
}

#[cfg(test)]
mod tests;
