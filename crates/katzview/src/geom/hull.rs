use std::cmp::Ordering;

use super::types::Point;

/// Twice the signed area of triangle `(a, b, c)`: cross product of `b-a` and `c-a`.
/// Positive for a counter-clockwise turn.
#[inline]
pub fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Closed hull polygon: lower chain then upper chain, first vertex repeated last.
///
/// Inputs with fewer than three points are kept as-is and yield no edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hull {
    points: Vec<Point>,
    closed: bool,
}

impl Hull {
    /// Raw traversal, including the repeated closing vertex when closed.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Distinct hull vertices (closing duplicate dropped).
    pub fn vertices(&self) -> &[Point] {
        if self.closed {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Edges `(z[i], z[i+1])` for `i` in `0..m-1`.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let pts: &[Point] = if self.closed { &self.points } else { &[] };
        pts.windows(2).map(|w| (w[0], w[1]))
    }
}

fn lexicographic(a: &Point, b: &Point) -> Ordering {
    match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        o => o,
    }
}

/// Andrew's monotone-chain convex hull.
///
/// Collinear boundary points are dropped (pop on `signed_area <= 0`). The
/// result is lower hull then upper hull on a single stack, so the first vertex
/// appears again at the end.
pub fn convex_hull(points: &[Point]) -> Hull {
    let mut hull = Hull::default();
    convex_hull_into(points, &mut Vec::new(), &mut hull);
    hull
}

/// Same as [`convex_hull`], reusing `scratch` and `out` allocations.
pub(crate) fn convex_hull_into(points: &[Point], scratch: &mut Vec<Point>, out: &mut Hull) {
    let stack = &mut out.points;
    stack.clear();
    if points.len() < 3 {
        stack.extend_from_slice(points);
        out.closed = false;
        return;
    }
    scratch.clear();
    scratch.extend_from_slice(points);
    scratch.sort_by(lexicographic);

    for &p in scratch.iter() {
        while stack.len() >= 2 && signed_area(stack[stack.len() - 2], stack[stack.len() - 1], p) <= 0.0 {
            stack.pop();
        }
        stack.push(p);
    }
    // Upper chain may not pop into the lower one.
    let floor = stack.len() + 1;
    for &p in scratch.iter().rev().skip(1) {
        while stack.len() >= floor
            && signed_area(stack[stack.len() - 2], stack[stack.len() - 1], p) <= 0.0
        {
            stack.pop();
        }
        stack.push(p);
    }
    out.closed = true;
}
