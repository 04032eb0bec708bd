//! Session state: points, view transform, inversion circle, drag mode, flags.

use nalgebra::Vector2;

use super::cfg::ViewerCfg;
use crate::geom::{InversionParams, Point, ViewTransform};

/// Current pointer drag. Exactly one variant is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Moving the inversion center with the primary button.
    CenterWindow,
    /// Secondary-button grab of the center; relocation happens on release.
    CenterImage,
    /// Panning; `anchor` is the last pointer position already applied.
    Background { anchor: (i32, i32) },
}

/// Interpolation order selected by the user (session state only).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterpolationOrder {
    #[default]
    Nearest,
    Linear,
    Bilinear,
    Bicubic,
}

impl InterpolationOrder {
    pub fn from_digit(d: u32) -> Option<Self> {
        match d {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            2 => Some(Self::Bilinear),
            3 => Some(Self::Bicubic),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn next(self) -> Self {
        Self::from_digit((self.index() + 1) % 4).unwrap_or_default()
    }
}

/// Display toggles. Only `show_debug` changes what the frame contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub interpolation: InterpolationOrder,
    pub tile_plane: bool,
    pub show_horizon: bool,
    pub show_grid_points: bool,
    pub show_debug: bool,
}

/// The mutable viewer session.
///
/// The point set is fixed at construction; everything else is reset by
/// `center_view` and mutated by the input handlers.
#[derive(Clone, Debug)]
pub struct ViewerState {
    points: Vec<Point>,
    transform: ViewTransform,
    inversion: InversionParams,
    drag: DragState,
    display: DisplayOptions,
}

impl ViewerState {
    pub fn new(points: Vec<Point>, cfg: &ViewerCfg) -> Self {
        let mut state = Self {
            points,
            transform: ViewTransform::identity(),
            inversion: InversionParams::new(Vector2::zeros(), cfg.default_radius),
            drag: DragState::Idle,
            display: DisplayOptions::default(),
        };
        state.center_view(cfg);
        state
    }

    /// Restore the default transform, inversion circle, drag mode and flags.
    pub fn center_view(&mut self, cfg: &ViewerCfg) {
        let [cx, cy] = cfg.default_center;
        self.inversion = InversionParams::new(Vector2::new(cx, cy), cfg.default_radius);
        self.transform = ViewTransform::identity();
        self.drag = DragState::Idle;
        self.display = DisplayOptions::default();
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    #[inline]
    pub fn inversion(&self) -> &InversionParams {
        &self.inversion
    }

    #[inline]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    #[inline]
    pub(crate) fn set_drag(&mut self, drag: DragState) {
        self.drag = drag;
    }

    /// Place the inversion circle directly (center in view space).
    pub fn set_inversion(&mut self, center: Point, radius: f64, cfg: &ViewerCfg) {
        if center.x.is_finite() && center.y.is_finite() {
            self.inversion.center = center;
        }
        if radius.is_finite() {
            self.inversion.radius = radius.max(cfg.min_radius);
        }
    }

    /// Pan the view by a window-space delta.
    #[inline]
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.transform.translate(Vector2::new(dx, dy));
    }

    /// Zoom about a window-space anchor.
    pub fn zoom_about(&mut self, x: f64, y: f64, factor: f64, cfg: &ViewerCfg) {
        self.transform
            .zoom_about(Vector2::new(x, y), factor, cfg.min_scale, cfg.max_scale);
        tracing::debug!(scale = self.transform.scale(), "zoom changed");
    }

    pub fn scale_radius(&mut self, factor: f64, cfg: &ViewerCfg) {
        self.inversion.scale_radius(factor, cfg.min_radius);
        tracing::debug!(radius = self.inversion.radius, "radius changed");
    }

    /// Move the inversion center under the window-space pointer.
    #[inline]
    pub fn move_center_to(&mut self, x: i32, y: i32) {
        self.inversion.center = self.transform.to_view(Vector2::new(x as f64, y as f64));
    }

    /// Whether the pointer is over the inversion-center handle.
    pub fn hit_center(&self, x: f64, y: f64, cfg: &ViewerCfg) -> bool {
        let p = self.transform.to_window(self.inversion.center);
        (p.x - x).hypot(p.y - y) < cfg.disk_radius + 2.0
    }
}
