//! Pixel traversals for segments and circle outlines.
//!
//! Both walks take the logical canvas size and only visit steps whose pixel
//! can land inside it. The set of in-bounds pixels is exactly what an
//! unclipped walk would produce, but the cost stays bounded by the window
//! size when a zoomed-in primitive spans billions of pixels.

/// Clip the real segment `p..q` to the box `[lo.0, hi.0] × [lo.1, hi.1]`
/// (Liang–Barsky). `None` when it misses the box or has a non-finite coordinate.
pub(crate) fn clip_segment(
    p: [f64; 2],
    q: [f64; 2],
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<([f64; 2], [f64; 2])> {
    if !p.iter().chain(q.iter()).all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (pk, qk) in [
        (-dx, p[0] - lo.0),
        (dx, hi.0 - p[0]),
        (-dy, p[1] - lo.1),
        (dy, hi.1 - p[1]),
    ] {
        if pk == 0.0 {
            if qk < 0.0 {
                return None;
            }
            continue;
        }
        let r = qk / pk;
        if pk < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let at = |t: f64| [p[0] + t * dx, p[1] + t * dy];
    // keep exact endpoints when nothing was cut
    let a = if t0 > 0.0 { at(t0) } else { p };
    let b = if t1 < 1.0 { at(t1) } else { q };
    Some((a, b))
}

/// Visit the pixels of the digital segment from `p` to `q`.
///
/// Endpoints are first ordered so that `q` has the larger `x + y`. Then the
/// walk advances one unit along x (`|dx| > dy`, end pixel excluded) or along y
/// (end pixel included), rounding the other coordinate to nearest.
/// Coincident endpoints visit exactly one pixel.
pub fn traverse_segment(
    p: (i32, i32),
    q: (i32, i32),
    bounds: (i64, i64),
    mut f: impl FnMut(i64, i64),
) {
    let (mut px, mut py) = (p.0 as i64, p.1 as i64);
    let (mut qx, mut qy) = (q.0 as i64, q.1 as i64);
    if px == qx && py == qy {
        f(px, py);
        return;
    }
    if qx + qy < px + py {
        std::mem::swap(&mut px, &mut qx);
        std::mem::swap(&mut py, &mut qy);
    }
    let (w, h) = bounds;
    let (dx, dy) = (qx - px, qy - py);
    if dx > dy || -dx > dy {
        // dx > 0 here
        let slope = dy as f64 / dx as f64;
        let lo = (-px).max(0);
        let hi = dx.min(w - px);
        for i in lo..hi {
            f(px + i, (py as f64 + i as f64 * slope).round_ties_even() as i64);
        }
    } else {
        // dy >= |dx| and dy > 0 here
        let slope = dx as f64 / dy as f64;
        let lo = (-py).max(0);
        let hi = dy.min(h - 1 - py);
        for j in lo..=hi {
            f((px as f64 + j as f64 * slope).round_ties_even() as i64, py + j);
        }
    }
}

/// Visit the 8-way symmetric outline of the circle of radius `r` around `c`.
///
/// For `i` in `[-r/√2, r/√2]` with `s = ⌊√(r² - i²)⌋`, plots `(cx+i, cy±s)`
/// and `(cx±s, cy+i)`.
pub fn traverse_circle(c: (i32, i32), r: i32, bounds: (i64, i64), mut f: impl FnMut(i64, i64)) {
    if r < 0 {
        return;
    }
    let (cx, cy) = (c.0 as i64, c.1 as i64);
    let r = r as i64;
    let half = (r as f64 / std::f64::consts::SQRT_2) as i64;
    let (w, h) = bounds;
    let s_of = |i: i64| ((r * r - i * i) as f64).sqrt() as i64;

    // upper and lower arcs: column cx+i must be visible
    for i in (-half).max(-cx)..=half.min(w - 1 - cx) {
        let s = s_of(i);
        f(cx + i, cy + s);
        f(cx + i, cy - s);
    }
    // right and left arcs: row cy+i must be visible
    for i in (-half).max(-cy)..=half.min(h - 1 - cy) {
        let s = s_of(i);
        f(cx + s, cy + i);
        f(cx - s, cy + i);
    }
}
