//! Scanline polygon fill driven by a per-row edge table.
//!
//! Every edge is walked with the same shallow/steep Bresenham stepping the
//! line rasterizer uses. Each visited (x, y) widens that row's `[x_start,
//! x_end]` and remembers the interpolated payload at both boundaries. Rows are
//! then filled over the half-open span `[x_start, x_end)`, from the top-most
//! vertex row down to (not including) the bottom-most one, so polygons that
//! share an edge never paint the same pixel twice.

use super::interpolate::{lerp_payload, AttributeStepper};
use super::line::{is_steep, walk_shallow, walk_steep};
use super::vertex::{
    Point, ScreenPolygon, ScreenVertex, BLUE, COLOR_ATTRIBUTES, GREEN, RED, TEXTURED_ATTRIBUTES,
    TEX_U, TEX_V,
};
use crate::display::{Color, PixelBuffer};
use crate::texture::Texture;

/// Per-scanline span bounds (and boundary payloads) for one draw call.
/// Sized from the target buffer's height, dropped when the call returns.
struct EdgeTable {
    x_start: Vec<i32>,
    x_end: Vec<i32>,
    start_payload: Vec<f32>,
    end_payload: Vec<f32>,
    attributes: usize,
    height: i32,
    guard: Guard,
}

/// Rectangle edges are clipped to before walking: one buffer size of margin
/// on every side. Off-screen columns only feed the per-row min/max, so points
/// past the margin are pinned to it.
#[derive(Debug, Clone, Copy)]
struct Guard {
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl Guard {
    fn around(width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        Self {
            x_min: w.saturating_neg(),
            x_max: w.saturating_mul(2),
            y_min: h.saturating_neg(),
            y_max: h.saturating_mul(2),
        }
    }

    #[inline]
    fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }
}

impl EdgeTable {
    fn new(width: u32, height: u32, attributes: usize) -> Self {
        let rows = height as usize;
        Self {
            x_start: vec![width as i32; rows],
            x_end: vec![0; rows],
            start_payload: vec![0.0; rows * attributes],
            end_payload: vec![0.0; rows * attributes],
            attributes,
            height: height as i32,
            guard: Guard::around(width, height),
        }
    }

    /// Widen row `y` to include `x`. The first and last rows are never
    /// recorded.
    #[inline]
    fn record(&mut self, x: i32, y: i32, payload: &[f32]) {
        if y <= 0 || y >= self.height - 1 {
            return;
        }
        let row = y as usize;
        let slot = row * self.attributes..(row + 1) * self.attributes;
        if x < self.x_start[row] {
            self.x_start[row] = x;
            self.start_payload[slot.clone()].copy_from_slice(&payload[..self.attributes]);
        }
        if x > self.x_end[row] {
            self.x_end[row] = x;
            self.end_payload[slot].copy_from_slice(&payload[..self.attributes]);
        }
    }

    /// Record one polygon edge. Edges inside the guard band are walked
    /// directly; anything reaching past it is clipped first.
    fn trace_edge(&mut self, a: &ScreenVertex, b: &ScreenVertex) {
        let n = self.attributes;
        if self.guard.contains(a.pos) && self.guard.contains(b.pos) {
            self.walk_edge(a.pos, &a.payload[..n], b.pos, &b.payload[..n]);
        } else {
            self.trace_clipped(a, b);
        }
    }

    /// Bresenham walk of an edge, carrying the payload along
    fn walk_edge(&mut self, a: Point, pa: &[f32], b: Point, pb: &[f32]) {
        let steep = is_steep(a.x, a.y, b.x, b.y);
        let ((from, p_from), (to, p_to)) = if (steep && a.y > b.y) || (!steep && a.x > b.x) {
            ((b, pb), (a, pa))
        } else {
            ((a, pa), (b, pb))
        };

        let steps = if steep { to.y - from.y } else { to.x - from.x };
        let mut stepper = AttributeStepper::new(p_from, p_to, steps);
        let mut visit = |x: i32, y: i32| {
            self.record(x, y, stepper.value());
            stepper.step();
        };

        if steep {
            walk_steep(from.x, from.y, to.x, to.y, false, &mut visit);
        } else {
            walk_shallow(from.x, from.y, to.x, to.y, &mut visit);
        }
    }

    /// Clip an edge to the guard rows, split it where it crosses the guard
    /// columns, and walk each piece with x pinned into the band.
    fn trace_clipped(&mut self, a: &ScreenVertex, b: &ScreenVertex) {
        let g = self.guard;
        let (ax, ay) = (f64::from(a.pos.x), f64::from(a.pos.y));
        let (dx, dy) = (f64::from(b.pos.x) - ax, f64::from(b.pos.y) - ay);

        // Parameter range where the edge is inside the guard rows
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        if dy == 0.0 {
            if ay < f64::from(g.y_min) || ay > f64::from(g.y_max) {
                return;
            }
        } else {
            let ta = (f64::from(g.y_min) - ay) / dy;
            let tb = (f64::from(g.y_max) - ay) / dy;
            t0 = t0.max(ta.min(tb));
            t1 = t1.min(ta.max(tb));
            if t0 > t1 {
                return;
            }
        }

        let mut cuts = vec![t0, t1];
        if dx != 0.0 {
            for bound in [g.x_min, g.x_max] {
                let t = (f64::from(bound) - ax) / dx;
                if t > t0 && t < t1 {
                    cuts.push(t);
                }
            }
        }
        cuts.sort_by(f64::total_cmp);

        let n = self.attributes;
        let at = |t: f64| {
            let x = (ax + dx * t).round().clamp(f64::from(g.x_min), f64::from(g.x_max));
            let y = (ay + dy * t).round().clamp(f64::from(g.y_min), f64::from(g.y_max));
            let pos = Point { x: x as i32, y: y as i32 };
            (pos, lerp_payload(&a.payload[..n], &b.payload[..n], t as f32))
        };
        for pair in cuts.windows(2) {
            let (p, pp) = at(pair[0]);
            let (q, qp) = at(pair[1]);
            self.walk_edge(p, &pp, q, &qp);
        }
    }

    #[inline]
    fn span(&self, y: i32) -> (i32, i32) {
        (self.x_start[y as usize], self.x_end[y as usize])
    }

    #[inline]
    fn payloads(&self, y: i32) -> (&[f32], &[f32]) {
        let row = y as usize;
        let slot = row * self.attributes..(row + 1) * self.attributes;
        (&self.start_payload[slot.clone()], &self.end_payload[slot])
    }
}

/// Fill type for the shared span loop
enum Shade<'a> {
    Blended,
    Textured(&'a Texture),
}

#[inline]
fn payload_color(p: &[f32]) -> Color {
    Color::new(p[RED], p[GREEN], p[BLUE])
}

impl PixelBuffer {
    /// Trace every edge of `polygon` into a fresh edge table.
    /// Returns the table and the row range to fill, or `None` when nothing
    /// would be drawn.
    fn scan_polygon(
        &self,
        polygon: &ScreenPolygon,
        attributes: usize,
    ) -> Option<(EdgeTable, std::ops::Range<i32>)> {
        if !polygon.is_drawable() {
            log::trace!("skipping polygon with {} vertices", polygon.len());
            return None;
        }

        let (mut top, mut bottom) = (i32::MAX, i32::MIN);
        for v in polygon.vertices() {
            top = top.min(v.pos.y);
            bottom = bottom.max(v.pos.y);
        }
        let rows = top.max(0)..bottom.min(self.height() as i32);
        if rows.is_empty() {
            log::trace!("skipping polygon with empty row range {:?}", rows);
            return None;
        }

        let mut table = EdgeTable::new(self.width(), self.height(), attributes);
        for (a, b) in polygon.edges() {
            table.trace_edge(a, b);
        }
        Some((table, rows))
    }

    /// Fill a polygon with one solid color
    pub fn draw_polygon_flat(&mut self, color: Color, polygon: &ScreenPolygon) {
        let Some((table, rows)) = self.scan_polygon(polygon, 0) else {
            return;
        };
        let px = self.encode(color);
        for y in rows {
            let (x_start, x_end) = table.span(y);
            self.fill_span(y, x_start, x_end, px);
        }
    }

    /// Fill a polygon, interpolating the per-vertex r, g, b payload channels
    /// across each span (Gouraud shading)
    pub fn draw_polygon_blended(&mut self, polygon: &ScreenPolygon) {
        if polygon.attributes() < COLOR_ATTRIBUTES {
            log::debug!(
                "blended fill needs {} attributes, polygon has {}",
                COLOR_ATTRIBUTES,
                polygon.attributes()
            );
            return;
        }
        self.draw_polygon_shaded(polygon, &Shade::Blended);
    }

    /// Fill a polygon with a bilinear-filtered texture, lit by the
    /// interpolated vertex color. Payload channels: r, g, b, u, v.
    pub fn draw_polygon_textured(&mut self, polygon: &ScreenPolygon, texture: &Texture) {
        if polygon.attributes() < TEXTURED_ATTRIBUTES {
            log::debug!(
                "textured fill needs {} attributes, polygon has {}",
                TEXTURED_ATTRIBUTES,
                polygon.attributes()
            );
            return;
        }
        self.draw_polygon_shaded(polygon, &Shade::Textured(texture));
    }

    /// Shaded fills carry the polygon's whole payload, whatever its width
    fn draw_polygon_shaded(&mut self, polygon: &ScreenPolygon, shade: &Shade) {
        let Some((table, rows)) = self.scan_polygon(polygon, polygon.attributes()) else {
            return;
        };
        let order = self.channel_order();
        let width = self.width() as i32;

        for y in rows {
            let (x_start, x_end) = table.span(y);
            if x_start >= x_end {
                continue;
            }
            let (left, right) = table.payloads(y);
            let mut stepper = AttributeStepper::new(left, right, x_end - x_start);

            // Spans that begin off-screen start partway along the gradient
            let first = x_start.max(0);
            stepper.skip(first - x_start);
            let last = x_end.min(width);

            let span = self.span_mut(y, first, last);
            for px in span.chunks_exact_mut(4) {
                let p = stepper.value();
                let color = match shade {
                    Shade::Blended => payload_color(p),
                    Shade::Textured(texture) => texture
                        .sample_bilinear(p[TEX_U], p[TEX_V])
                        .modulate(payload_color(p)),
                };
                px.copy_from_slice(&order.encode(color));
                stepper.step();
            }
        }
    }
}
