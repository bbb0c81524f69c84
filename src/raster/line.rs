//! Single-color line segments: float-incremental ("naive") and integer-error
//! (Bresenham) rasterizers sharing one dispatcher.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::display::{Color, PixelBuffer};

/// Which line rasterizer to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    /// Float slope added per step, truncated to a pixel
    Naive,
    /// Integer decision variable, no floating point
    #[default]
    Bresenham,
}

/// Shallow lines step along x, steep lines along y (ties count as steep)
#[inline]
pub(crate) fn is_steep(x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
    (i64::from(y2) - i64::from(y1)).abs() >= (i64::from(x2) - i64::from(x1)).abs()
}

/// Bresenham walk of a shallow segment with `x1 <= x2`, visiting every column
/// from x1 to x2 inclusive. The decision variable is kept in i64 so any pair
/// of i32 endpoints is safe.
pub(crate) fn walk_shallow(x1: i32, y1: i32, x2: i32, y2: i32, mut visit: impl FnMut(i32, i32)) {
    let dx = i64::from(x2) - i64::from(x1);
    let mut dy = i64::from(y2) - i64::from(y1);
    let mut y_inc = 1;
    if dy < 0 {
        y_inc = -1;
        dy = -dy;
    }

    let mut d = 2 * dy - dx;
    let d_inc = 2 * (dy - dx);
    let d_no_inc = 2 * dy;

    let mut y = y1;
    for x in x1..=x2 {
        visit(x, y);
        if d > 0 {
            y += y_inc;
            d += d_inc;
        } else {
            d += d_no_inc;
        }
    }
}

/// Bresenham walk of a steep segment with `y1 <= y2`, visiting rows y1..y2,
/// plus y2 itself when `include_end` is set.
pub(crate) fn walk_steep(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    include_end: bool,
    mut visit: impl FnMut(i32, i32),
) {
    let mut dx = i64::from(x2) - i64::from(x1);
    let dy = i64::from(y2) - i64::from(y1);
    let mut x_inc = 1;
    if dx < 0 {
        x_inc = -1;
        dx = -dx;
    }

    let mut d = 2 * dx - dy;
    let d_inc = 2 * (dx - dy);
    let d_no_inc = 2 * dx;

    let end = if include_end { y2.saturating_add(1) } else { y2 };
    let mut x = x1;
    for y in y1..end {
        visit(x, y);
        if d > 0 {
            x += x_inc;
            d += d_inc;
        } else {
            d += d_no_inc;
        }
    }
}

impl PixelBuffer {
    /// Draw a line from (x1, y1) to (x2, y2), both endpoints included.
    ///
    /// Endpoints are clamped into the buffer first. Axis-aligned segments take
    /// the vertical/horizontal fast paths; everything else is walked along
    /// its major axis with exactly one pixel per step.
    pub fn draw_line(
        &mut self,
        color: Color,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        algorithm: LineAlgorithm,
    ) {
        let (x1, y1) = (self.clamp_x(x1), self.clamp_y(y1));
        let (x2, y2) = (self.clamp_x(x2), self.clamp_y(y2));

        if x1 == x2 {
            self.vline(x1, y1, y2, color);
            return;
        }
        if y1 == y2 {
            self.hline(x1, x2, y1, color);
            return;
        }

        let px = self.encode(color);
        let steep = is_steep(x1, y1, x2, y2);
        // Order endpoints so the major coordinate increases
        let (x1, y1, x2, y2) = if (steep && y1 > y2) || (!steep && x1 > x2) {
            (x2, y2, x1, y1)
        } else {
            (x1, y1, x2, y2)
        };

        match (algorithm, steep) {
            (LineAlgorithm::Bresenham, false) => {
                walk_shallow(x1, y1, x2, y2, |x, y| self.put(x, y, px));
            },
            (LineAlgorithm::Bresenham, true) => {
                walk_steep(x1, y1, x2, y2, true, |x, y| self.put(x, y, px));
            },
            (LineAlgorithm::Naive, false) => self.shallow_line_naive(px, x1, y1, x2, y2),
            (LineAlgorithm::Naive, true) => self.steep_line_naive(px, x1, y1, x2, y2),
        }
    }

    /// `draw_line` with the float-incremental rasterizer
    pub fn draw_line_naive(&mut self, color: Color, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.draw_line(color, x1, y1, x2, y2, LineAlgorithm::Naive);
    }

    /// `draw_line` with the integer Bresenham rasterizer
    pub fn draw_line_bresenham(&mut self, color: Color, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.draw_line(color, x1, y1, x2, y2, LineAlgorithm::Bresenham);
    }

    fn shallow_line_naive(&mut self, px: [u8; 4], x1: i32, y1: i32, x2: i32, y2: i32) {
        let dydx = (y2 - y1) as f32 / (x2 - x1) as f32;
        let mut y = y1 as f32;
        for x in x1..=x2 {
            let screen_y = self.clamp_y(y as i32);
            self.put(x, screen_y, px);
            y += dydx;
        }
    }

    fn steep_line_naive(&mut self, px: [u8; 4], x1: i32, y1: i32, x2: i32, y2: i32) {
        let dxdy = (x2 - x1) as f32 / (y2 - y1) as f32;
        let mut x = x1 as f32;
        for y in y1..=y2 {
            let screen_x = self.clamp_x(x as i32);
            self.put(screen_x, y, px);
            x += dxdy;
        }
    }
}
