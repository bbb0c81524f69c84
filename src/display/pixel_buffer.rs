use super::color::{ChannelOrder, Color};
use crate::error::{RasterError, Result};
use crate::simd::{fill_pixels, fill_pixels_scalar, SIMD_SPAN_MIN};

// ============================================================================
// PixelBuffer
// ============================================================================

/// Packed 4-bytes-per-pixel color buffer for software rendering.
///
/// Row-major, top-left origin. The byte order of each pixel is fixed by the
/// `ChannelOrder` given at construction. A resolution change means building a
/// new buffer; there is no in-place resize.
///
/// All write primitives clamp coordinates into the buffer instead of
/// rejecting them.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl PixelBuffer {
    /// Create a buffer with the given resolution and channel order (cleared to 0)
    pub fn new(width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(RasterError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixels: vec![0; len],
            width,
            height,
            order,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Convert a color to this buffer's pixel bytes
    #[inline]
    pub fn encode(&self, color: Color) -> [u8; 4] {
        self.order.encode(color)
    }

    #[inline]
    pub(crate) fn clamp_x(&self, x: i32) -> i32 {
        x.clamp(0, self.width as i32 - 1)
    }

    #[inline]
    pub(crate) fn clamp_y(&self, y: i32) -> i32 {
        y.clamp(0, self.height as i32 - 1)
    }

    /// Byte offset for pixel at (x, y); caller guarantees bounds
    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 4
    }

    /// Write one pixel; caller guarantees (x, y) is inside the buffer
    #[inline]
    pub(crate) fn put(&mut self, x: i32, y: i32, px: [u8; 4]) {
        debug_assert!(x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height);
        let idx = self.pixel_index(x as usize, y as usize);
        self.pixels[idx..idx + 4].copy_from_slice(&px);
    }

    /// Fill every pixel with one color
    pub fn clear(&mut self, color: Color) {
        let px = self.encode(color);
        fill_pixels(&mut self.pixels, px);
    }

    /// Set a single pixel, clamping the coordinates to the buffer edge
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        let px = self.encode(color);
        let (x, y) = (self.clamp_x(x), self.clamp_y(y));
        self.put(x, y, px);
    }

    /// Read back the raw bytes of a pixel (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let idx = self.pixel_index(x as usize, y as usize);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(px)
    }

    /// Mutable bytes of pixels `[x_start, x_end)` on row `y`.
    /// Returns an empty slice when the clamped range is empty.
    #[inline]
    pub(crate) fn span_mut(&mut self, y: i32, x_start: i32, x_end: i32) -> &mut [u8] {
        let y = self.clamp_y(y) as usize;
        let start = x_start.clamp(0, self.width as i32) as usize;
        let end = x_end.clamp(0, self.width as i32) as usize;
        if start >= end {
            return &mut [];
        }
        let from = self.pixel_index(start, y);
        let to = self.pixel_index(end, y);
        &mut self.pixels[from..to]
    }

    /// Fill pixels `[x_start, x_end)` of row `y` with raw bytes.
    /// Wide spans go through the SIMD block writer.
    #[inline]
    pub(crate) fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, px: [u8; 4]) {
        let span = self.span_mut(y, x_start, x_end);
        if span.len() >= SIMD_SPAN_MIN * 4 {
            fill_pixels(span, px);
        } else {
            fill_pixels_scalar(span, px);
        }
    }

    /// Draw a horizontal line from x1 to x2 inclusive (endpoints in any order)
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        let px = self.encode(color);
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (start, end) = (self.clamp_x(x1), self.clamp_x(x2));
        self.fill_span(y, start, end + 1, px);
    }

    /// Draw a vertical line from y1 to y2 inclusive (endpoints in any order)
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Color) {
        let px = self.encode(color);
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let x = self.clamp_x(x);
        let start = self.clamp_y(y1);
        let end = self.clamp_y(y2);

        // Stride is width * 4 bytes per row
        let stride = self.width as usize * 4;
        let mut idx = self.pixel_index(x as usize, start as usize);
        for _ in start..=end {
            self.pixels[idx..idx + 4].copy_from_slice(&px);
            idx += stride;
        }
    }

    // ========================================================================
    // Buffer Access
    // ========================================================================

    /// Raw pixel bytes, for handing the finished frame to the presenter
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::new(w, h, ChannelOrder::Rgba).unwrap()
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 10, ChannelOrder::Rgba),
            Err(RasterError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        for order in [ChannelOrder::Rgba, ChannelOrder::Bgra] {
            // 37 pixels wide: total is not a multiple of the block size
            let mut fb = PixelBuffer::new(37, 5, order).unwrap();
            let c = Color::new(0.2, 0.6, 0.9);
            fb.clear(c);
            let expected = order.encode(c);
            for px in fb.as_bytes().chunks_exact(4) {
                assert_eq!(px, expected);
            }
        }
    }

    #[test]
    fn test_write_pixel_clamps() {
        let mut fb = buffer(8, 6);
        fb.write_pixel(-5, 100, Color::RED);
        assert_eq!(fb.get_pixel(0, 5), Some(ChannelOrder::Rgba.encode(Color::RED)));
        fb.write_pixel(50, -1, Color::GREEN);
        assert_eq!(fb.get_pixel(7, 0), Some(ChannelOrder::Rgba.encode(Color::GREEN)));
        assert_eq!(fb.get_pixel(8, 0), None);
    }

    #[test]
    fn test_hline_inclusive_and_clamped() {
        let mut fb = buffer(40, 3);
        fb.hline(30, -10, 1, Color::WHITE);
        let white = fb.encode(Color::WHITE);
        for x in 0..=30 {
            assert_eq!(fb.get_pixel(x, 1), Some(white), "x={}", x);
        }
        assert_eq!(fb.get_pixel(31, 1), Some([0, 0, 0, 0]));
        assert_eq!(fb.get_pixel(5, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_wide_hline_matches_pixel_writes() {
        let mut simd = buffer(100, 4);
        let mut scalar = buffer(100, 4);
        for (x1, x2) in [(3, 60), (0, 99), (17, 33), (5, 20), (1, 1)] {
            simd.hline(x1, x2, 2, Color::BLUE);
            for x in x1..=x2 {
                scalar.write_pixel(x, 2, Color::BLUE);
            }
            assert_eq!(simd.as_bytes(), scalar.as_bytes());
        }
    }

    #[test]
    fn test_vline_sorted_and_clamped() {
        let mut fb = buffer(4, 10);
        fb.vline(2, 20, 6, Color::RED);
        let red = fb.encode(Color::RED);
        for y in 6..10 {
            assert_eq!(fb.get_pixel(2, y), Some(red));
        }
        assert_eq!(fb.get_pixel(2, 5), Some([0, 0, 0, 0]));
    }
}
