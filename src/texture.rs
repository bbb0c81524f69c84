//! Float-plane textures for the textured polygon fill
//!
//! Storage is three separate r/g/b planes of normalized floats, row-major.
//! Textures are immutable once built; the rasterizer only samples them.

use crate::display::Color;
use crate::error::{RasterError, Result};

#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    r: Vec<f32>,
    g: Vec<f32>,
    b: Vec<f32>,
}

impl Texture {
    /// Build from three planes of `width * height` floats each
    pub fn from_planes(width: u32, height: u32, r: Vec<f32>, g: Vec<f32>, b: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        for plane in [&r, &g, &b] {
            if plane.len() != expected {
                return Err(RasterError::TextureSize {
                    expected,
                    got: plane.len(),
                });
            }
        }
        Ok(Self { width, height, r, g, b })
    }

    /// Build from packed RGBA8 bytes (alpha is dropped)
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected * 4 {
            return Err(RasterError::TextureSize {
                expected: expected * 4,
                got: data.len(),
            });
        }
        let mut r = Vec::with_capacity(expected);
        let mut g = Vec::with_capacity(expected);
        let mut b = Vec::with_capacity(expected);
        for px in data.chunks_exact(4) {
            r.push(px[0] as f32 / 255.0);
            g.push(px[1] as f32 / 255.0);
            b.push(px[2] as f32 / 255.0);
        }
        Self::from_planes(width, height, r, g, b)
    }

    /// Texel at (x, y), clamped to the edge
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = y * self.width as usize + x;
        Color::new(self.r[idx], self.g[idx], self.b[idx])
    }

    /// Bilinear sample at normalized (u, v).
    ///
    /// Coordinates are clamped to [0, 1], with 0 and 1 landing on the centers
    /// of the first and last texels. Neighbours past the edge are clamped.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        // NaN falls through clamp unchanged; max/min map it to 0
        let fu = u.max(0.0).min(1.0) * (self.width - 1) as f32;
        let fv = v.max(0.0).min(1.0) * (self.height - 1) as f32;

        let x0 = fu as u32;
        let y0 = fv as u32;
        let fx = fu - x0 as f32;
        let fy = fv - y0 as f32;

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        Color::new(
            lerp(lerp(c00.r, c10.r, fx), lerp(c01.r, c11.r, fx), fy),
            lerp(lerp(c00.g, c10.g, fx), lerp(c01.g, c11.g, fx), fy),
            lerp(lerp(c00.b, c10.b, fx), lerp(c01.b, c11.b, fx), fy),
        )
    }
}

// ============================================================================
// Procedural Texture Generators
// ============================================================================

impl Texture {
    /// Generate a checkerboard pattern
    pub fn checkerboard(size: u32, tile_size: u32, c1: Color, c2: Color) -> Result<Self> {
        let tile_size = tile_size.max(1);
        let len = size as usize * size as usize;
        let (mut r, mut g, mut b) = (Vec::with_capacity(len), Vec::with_capacity(len), Vec::with_capacity(len));
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
                let c = if checker { c1 } else { c2 };
                r.push(c.r);
                g.push(c.g);
                b.push(c.b);
            }
        }
        Self::from_planes(size, size, r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Texture {
        // 3x2, red grows along x, green along y
        Texture::from_planes(
            3,
            2,
            vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![0.25; 6],
        )
        .unwrap()
    }

    #[test]
    fn test_plane_size_mismatch() {
        let err = Texture::from_planes(2, 2, vec![0.0; 4], vec![0.0; 3], vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, RasterError::TextureSize { expected: 4, got: 3 }));
        assert!(Texture::from_rgba8(2, 2, &[0; 15]).is_err());
    }

    #[test]
    fn test_corners_hit_texel_centers() {
        let tex = ramp();
        assert_eq!(tex.sample_bilinear(0.0, 0.0), tex.texel(0, 0));
        assert_eq!(tex.sample_bilinear(1.0, 1.0), tex.texel(2, 1));
    }

    #[test]
    fn test_bilinear_blends_neighbours() {
        let c = ramp().sample_bilinear(0.25, 0.5);
        assert!((c.r - 0.25).abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert!((c.b - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_coordinates_clamp() {
        let tex = ramp();
        assert_eq!(tex.sample_bilinear(-3.0, -1.0), tex.texel(0, 0));
        assert_eq!(tex.sample_bilinear(7.0, 2.0), tex.texel(2, 1));
        assert_eq!(tex.sample_bilinear(f32::NAN, f32::NAN), tex.texel(0, 0));
        assert_eq!(tex.texel(99, 99), tex.texel(2, 1));
    }

    #[test]
    fn test_checkerboard_tiles() {
        let tex = Texture::checkerboard(8, 4, Color::WHITE, Color::BLACK).unwrap();
        assert_eq!(tex.texel(0, 0), Color::WHITE);
        assert_eq!(tex.texel(4, 0), Color::BLACK);
        assert_eq!(tex.texel(4, 4), Color::WHITE);
    }

    #[test]
    fn test_from_rgba8_normalizes() {
        let tex = Texture::from_rgba8(1, 1, &[255, 0, 51, 255]).unwrap();
        assert_eq!(tex.texel(0, 0), Color::new(1.0, 0.0, 0.2));
    }
}
