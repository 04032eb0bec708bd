//! Viewer tunables.
//!
//! - `ViewerCfg`: every constant the interaction and paint code uses, with
//!   serde defaults so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::InversionMap;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum CfgError {
    #[error("`{field}` must be finite and positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error("min_scale ({min}) must be below max_scale ({max})")]
    ScaleRange { min: f64, max: f64 },
    #[error("window capacity must be non-zero (got {w}x{h})")]
    EmptyCapacity { w: usize, h: usize },
    #[error("window capacity {w}x{h} exceeds {max} pixels per side")]
    CapacityTooLarge { w: usize, h: usize, max: usize },
}

/// Interaction and drawing constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerCfg {
    /// Radius (pixels) of the inversion-center handle.
    pub disk_radius: f64,
    /// Radius (pixels) of each plotted point.
    pub point_radius: f64,
    /// View zoom factor per key press or wheel step.
    pub zoom_factor: f64,
    /// Inversion radius factor per wheel step over the handle.
    pub radius_factor: f64,
    pub pan_step_small: f64,
    pub pan_step_large: f64,
    pub default_center: [f64; 2],
    pub default_radius: f64,
    pub min_radius: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Pixel-buffer capacity; the logical window never exceeds it.
    pub max_width: usize,
    pub max_height: usize,
    pub inversion: InversionMap,
}

impl Default for ViewerCfg {
    fn default() -> Self {
        Self {
            disk_radius: 7.3,
            point_radius: 2.3,
            zoom_factor: 1.43,
            radius_factor: 1.13,
            pan_step_small: 10.0,
            pan_step_large: 100.0,
            default_center: [100.0, 100.0],
            default_radius: 400.0,
            min_radius: 1e-6,
            min_scale: 1e-9,
            max_scale: 1e9,
            max_width: 2000,
            max_height: 2000,
            inversion: InversionMap::Flip,
        }
    }
}

/// Largest marker radius we are willing to splat per point.
const MAX_MARKER_RADIUS: f64 = 256.0;

/// Largest buffer side; 8192² RGB is 192 MiB.
const MAX_CAPACITY: usize = 8192;

fn positive(field: &'static str, value: f64) -> Result<(), CfgError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CfgError::NotPositive { field, value })
    }
}

impl ViewerCfg {
    pub fn validate(&self) -> Result<(), CfgError> {
        positive("disk_radius", self.disk_radius)?;
        positive("point_radius", self.point_radius)?;
        for (field, value) in [("disk_radius", self.disk_radius), ("point_radius", self.point_radius)] {
            if value > MAX_MARKER_RADIUS {
                return Err(CfgError::TooLarge {
                    field,
                    value,
                    max: MAX_MARKER_RADIUS,
                });
            }
        }
        positive("zoom_factor", self.zoom_factor)?;
        positive("radius_factor", self.radius_factor)?;
        positive("pan_step_small", self.pan_step_small)?;
        positive("pan_step_large", self.pan_step_large)?;
        positive("default_radius", self.default_radius)?;
        positive("min_radius", self.min_radius)?;
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale >= self.max_scale {
            return Err(CfgError::ScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.default_center[0].is_finite() && self.default_center[1].is_finite()) {
            return Err(CfgError::NotFinite {
                field: "default_center",
            });
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(CfgError::EmptyCapacity {
                w: self.max_width,
                h: self.max_height,
            });
        }
        if self.max_width > MAX_CAPACITY || self.max_height > MAX_CAPACITY {
            return Err(CfgError::CapacityTooLarge {
                w: self.max_width,
                h: self.max_height,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}
