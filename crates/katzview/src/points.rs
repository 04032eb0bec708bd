//! Point sets: parsing, formatting and small synthetic generators.
//!
//! Text format: whitespace-separated decimal numbers read as interleaved
//! `x y` pairs. Any unparsable token, non-finite value or odd count is an error.
//!
//! Generators are deterministic given a seed (`StdRng::seed_from_u64`).

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::io::Read;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::geom::Point;

/// Malformed point input.
#[derive(Debug, Error)]
pub enum PointsError {
    #[error("token {index} ({token:?}) is not a number")]
    BadToken { index: usize, token: String },
    #[error("token {index} ({token:?}) is not finite")]
    NotFinite { index: usize, token: String },
    #[error("odd number of values ({count}); expected x y pairs")]
    OddCount { count: usize },
    #[error("reading points: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse interleaved `x y` pairs.
pub fn parse_points(text: &str) -> Result<Vec<Point>, PointsError> {
    let mut values = Vec::new();
    for (index, token) in text.split_whitespace().enumerate() {
        let v: f64 = token.parse().map_err(|_| PointsError::BadToken {
            index,
            token: token.to_string(),
        })?;
        if !v.is_finite() {
            return Err(PointsError::NotFinite {
                index,
                token: token.to_string(),
            });
        }
        values.push(v);
    }
    if values.len() % 2 != 0 {
        return Err(PointsError::OddCount {
            count: values.len(),
        });
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| Vector2::new(xy[0], xy[1]))
        .collect())
}

/// Read the whole stream and parse it with [`parse_points`].
pub fn read_points<R: Read>(mut reader: R) -> Result<Vec<Point>, PointsError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let points = parse_points(&text)?;
    tracing::info!(n = points.len(), "read points");
    Ok(points)
}

/// One `x y` line per point.
pub fn format_points(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for p in points {
        // writing to a String cannot fail
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
    out
}

/// Random point distributions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distribution {
    /// Independent standard normal coordinates.
    Gaussian,
    /// Independent coordinates uniform on `[-0.5, 0.5)`.
    Uniform,
    /// Uniform angle, standard Cauchy radius.
    Cauchy,
}

fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // Box–Muller; u1 in (0, 1] keeps the log finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn standard_cauchy<R: Rng>(rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    (PI * (u - 0.5)).tan()
}

/// `n` points from `dist`, scaled by `scale` and shifted by `offset`.
pub fn random_points(dist: Distribution, n: usize, scale: f64, offset: Point, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let p = match dist {
                Distribution::Gaussian => {
                    let x = standard_normal(&mut rng);
                    Vector2::new(x, standard_normal(&mut rng)) * scale
                }
                Distribution::Uniform => {
                    let x = rng.gen::<f64>() - 0.5;
                    Vector2::new(x, rng.gen::<f64>() - 0.5) * scale
                }
                Distribution::Cauchy => {
                    let theta = 2.0 * PI * rng.gen::<f64>();
                    let rho = scale * standard_cauchy(&mut rng);
                    Vector2::new(rho * theta.cos(), rho * theta.sin())
                }
            };
            p + offset
        })
        .collect()
}

/// Named small configurations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Config {
    /// Unit square at the origin and a square of side `side` with corner at `(far, far)`.
    TwoSquares { far: f64, side: f64 },
    /// `(0,0)`, `(1,0)` and the point at `angle_deg` and distance `side` from the origin.
    Triangle { angle_deg: f64, side: f64 },
}

impl Config {
    pub fn two_squares() -> Self {
        Config::TwoSquares {
            far: 10.0,
            side: 0.25,
        }
    }

    pub fn triangle() -> Self {
        Config::Triangle {
            angle_deg: 90.0,
            side: 1.0,
        }
    }
}

pub fn config_points(config: Config) -> Vec<Point> {
    match config {
        Config::TwoSquares { far, side } => vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(far, far),
            Vector2::new(far + side, far),
            Vector2::new(far, far + side),
            Vector2::new(far + side, far + side),
        ],
        Config::Triangle { angle_deg, side } => {
            let a = angle_deg.to_radians();
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(side * a.cos(), side * a.sin()),
            ]
        }
    }
}

/// Point-wise maps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointMap {
    Translate(Point),
    Scale(f64),
}

pub fn map_points(points: &mut [Point], map: PointMap) {
    match map {
        PointMap::Translate(t) => points.iter_mut().for_each(|p| *p += t),
        PointMap::Scale(s) => points.iter_mut().for_each(|p| *p *= s),
    }
}
