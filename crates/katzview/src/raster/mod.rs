//! Software rasterizer over a flat RGB byte buffer.
//!
//! Purpose
//! - Plot pixels, digital segments, circle outlines and filled disks.
//! - Every primitive clips per pixel: writes outside the logical `w × h`
//!   area are silently dropped, there is no other bounds handling.
//!
//! Layout
//! - Row-major, 3 bytes per pixel, row stride equal to the logical width.
//! - Storage is allocated once for `max_w × max_h` and never reallocated;
//!   `resize` only changes the logical size (clamped to capacity).

mod draw;

pub use draw::{traverse_circle, traverse_segment};

/// An RGB color triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const RED: Rgb = Rgb([255, 0, 0]);
    pub const BLUE: Rgb = Rgb([0, 0, 255]);
    pub const CYAN: Rgb = Rgb([0, 255, 255]);
    pub const GREEN: Rgb = Rgb([0, 128, 0]);
    pub const DARK_GREEN: Rgb = Rgb([0, 127, 0]);
    pub const GRAY: Rgb = Rgb([120, 120, 120]);
}

/// Fixed-capacity RGB canvas.
#[derive(Clone, Debug)]
pub struct Canvas {
    rgb: Vec<u8>,
    w: usize,
    h: usize,
    max_w: usize,
    max_h: usize,
}

impl Canvas {
    /// Allocate `max_w × max_h` pixels; the logical size starts at `w × h` (clamped).
    pub fn new(w: usize, h: usize, max_w: usize, max_h: usize) -> Self {
        Self {
            rgb: vec![0; max_w * max_h * 3],
            w: w.min(max_w),
            h: h.min(max_h),
            max_w,
            max_h,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn capacity(&self) -> (usize, usize) {
        (self.max_w, self.max_h)
    }

    /// Change the logical size, clamped to capacity. Returns the size actually set.
    pub fn resize(&mut self, w: usize, h: usize) -> (usize, usize) {
        self.w = w.min(self.max_w);
        self.h = h.min(self.max_h);
        (self.w, self.h)
    }

    /// The visible frame: `w * h * 3` bytes.
    #[inline]
    pub fn as_rgb(&self) -> &[u8] {
        &self.rgb[..self.w * self.h * 3]
    }

    /// Whole backing store, for tests that check nothing leaks past the frame.
    #[inline]
    pub fn storage(&self) -> &[u8] {
        &self.rgb
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.w as u64 && (y as u64) < self.h as u64
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.contains(x, y)
            .then(|| 3 * (self.w * y as usize + x as usize))
    }

    pub fn clear(&mut self, color: Rgb) {
        let n = self.w * self.h;
        for px in self.rgb[..n * 3].chunks_exact_mut(3) {
            px.copy_from_slice(&color.0);
        }
    }

    /// Color at `(x, y)`, `None` outside the logical area.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y)
            .map(|i| Rgb([self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]))
    }

    #[inline]
    pub fn plot(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.rgb[i..i + 3].copy_from_slice(&color.0);
        }
    }

    /// Overwrite one channel only (0 = red, 1 = green, 2 = blue).
    #[inline]
    pub fn plot_channel(&mut self, x: i64, y: i64, channel: usize, value: u8) {
        if channel >= 3 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.rgb[i + channel] = value;
        }
    }

    /// Segment between two window-space points (coordinates truncated toward zero).
    ///
    /// The real segment is first clipped to the canvas grown by one pixel, so
    /// far off-screen endpoints keep the slope of the visible part.
    pub fn segment(&mut self, p: [f64; 2], q: [f64; 2], color: Rgb) {
        let (w, h) = (self.w as i64, self.h as i64);
        let Some((p, q)) = draw::clip_segment(p, q, (-1.0, -1.0), (w as f64, h as f64)) else {
            return;
        };
        traverse_segment(
            (p[0] as i32, p[1] as i32),
            (q[0] as i32, q[1] as i32),
            (w, h),
            |x, y| self.plot(x, y, color),
        );
    }

    /// Circle outline centered at `c` (truncated) with radius `r` (truncated).
    pub fn circle(&mut self, c: [f64; 2], r: f64, color: Rgb) {
        let (w, h) = (self.w as i64, self.h as i64);
        traverse_circle((c[0] as i32, c[1] as i32), r as i32, (w, h), |x, y| {
            self.plot(x, y, color)
        });
    }

    /// Filled disk: every offset `(i, j)` with `hypot(i, j) < r` around `p`.
    pub fn disk(&mut self, p: [f64; 2], r: f64, color: Rgb) {
        if !(r.is_finite() && r > 0.0) {
            return;
        }
        let lo = (-r - 1.0) as i64;
        let hi = (r + 1.0) as i64;
        for j in lo..=hi {
            for i in lo..=hi {
                if (i as f64).hypot(j as f64) < r {
                    let x = (p[0] + i as f64) as i32;
                    let y = (p[1] + j as f64) as i32;
                    self.plot(x as i64, y as i64, color);
                }
            }
        }
    }
}
