//! Per-frame paint.
//!
//! Fixed layer order: clear, input points, center handle, inversion circle,
//! (debug) inverted points, then hull edges. Inverted points and hull are
//! recomputed every frame into reusable buffers.

use super::Viewer;
use crate::geom::{convex_hull_into, invert, invert_all, signed_area, Hull, Point};
use crate::raster::{Canvas, Rgb};

/// Derived per-frame data, kept between frames only to reuse allocations.
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    pub(crate) inverted: Vec<Point>,
    pub(crate) scratch: Vec<Point>,
    pub(crate) hull: Hull,
}

#[inline]
fn xy(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

impl Viewer {
    /// Repaint the whole scene into `canvas`.
    pub fn paint(&mut self, canvas: &mut Canvas) {
        let Self { state, cfg, cache } = self;
        let t = *state.transform();
        let inv = *state.inversion();
        let show_debug = state.display().show_debug;

        canvas.clear(Rgb::WHITE);

        for &p in state.points() {
            canvas.disk(xy(t.to_window(p)), cfg.point_radius, Rgb::RED);
        }

        let c = t.to_window(inv.center);
        canvas.disk(xy(c), cfg.disk_radius, Rgb::DARK_GREEN);
        canvas.plot_channel(c.x as i32 as i64, c.y as i32 as i64, 1, 255);

        canvas.circle(xy(c), inv.radius * t.scale(), Rgb::GREEN);

        invert_all(cfg.inversion, &inv, state.points(), &mut cache.inverted);
        if show_debug {
            for &q in &cache.inverted {
                canvas.disk(xy(t.to_window(q)), cfg.point_radius, Rgb::GRAY);
            }
        }

        convex_hull_into(&cache.inverted, &mut cache.scratch, &mut cache.hull);
        if show_debug {
            let n = state.points().len();
            let m = cache.hull.len();
            tracing::debug!(
                n,
                m,
                percent = if n > 0 { m as f64 * 100.0 / n as f64 } else { 0.0 },
                "convex hull"
            );
        }

        for (a, b) in cache.hull.edges() {
            if show_debug {
                canvas.segment(xy(t.to_window(a)), xy(t.to_window(b)), Rgb::GRAY);
            }
            // Second inversion of the hull vertices, classified against the pole.
            let p = t.to_window(invert(cfg.inversion, inv.center, inv.radius, a));
            let q = t.to_window(invert(cfg.inversion, inv.center, inv.radius, b));
            if signed_area(p, q, c) > 0.0 {
                canvas.segment(xy(p), xy(q), Rgb::BLUE);
                canvas.disk(xy(p), cfg.point_radius, Rgb::BLUE);
            } else if show_debug {
                canvas.segment(xy(p), xy(q), Rgb::CYAN);
            }
        }
    }
}
