use serde::{Deserialize, Serialize};

/// Largest channel value accepted before conversion; keeps `c * 255` below 255.0
const CHANNEL_MAX: f32 = 0.99;

/// Normalized RGB color, each channel nominally in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Component-wise product, used to light a texel with a vertex color
    #[inline]
    pub fn modulate(self, other: Color) -> Self {
        Self {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }
}

/// Saturate one channel and scale to a byte (NaN maps to 0)
#[inline]
fn channel_to_byte(c: f32) -> u8 {
    let c = c.max(0.0).min(CHANNEL_MAX);
    (c * 255.0) as u8
}

/// Byte order of one packed pixel in the presentation image.
///
/// Picked once when the presentation format is known and bound into the
/// `PixelBuffer`; it never changes for the lifetime of that buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// bytes: R, G, B, A
    #[default]
    Rgba,
    /// bytes: B, G, R, A
    Bgra,
}

impl ChannelOrder {
    /// Convert a normalized color to the 4 bytes of one pixel
    #[inline]
    pub fn encode(self, color: Color) -> [u8; 4] {
        let r = channel_to_byte(color.r);
        let g = channel_to_byte(color.g);
        let b = channel_to_byte(color.b);
        match self {
            ChannelOrder::Rgba => [r, g, b, 0xFF],
            ChannelOrder::Bgra => [b, g, r, 0xFF],
        }
    }

    /// Inverse of `encode` on the byte level: returns (r, g, b) bytes
    #[inline]
    pub fn decode(self, px: [u8; 4]) -> (u8, u8, u8) {
        match self {
            ChannelOrder::Rgba => (px[0], px[1], px[2]),
            ChannelOrder::Bgra => (px[2], px[1], px[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_orders() {
        let c = Color::new(0.5, 0.25, 0.0);
        assert_eq!(ChannelOrder::Rgba.encode(c), [127, 63, 0, 255]);
        assert_eq!(ChannelOrder::Bgra.encode(c), [0, 63, 127, 255]);
    }

    #[test]
    fn test_encode_saturates() {
        // 0.99 * 255 = 252.45, anything above saturates there
        let hot = Color::new(4.0, -1.0, 1.0);
        assert_eq!(ChannelOrder::Rgba.encode(hot), [252, 0, 252, 255]);
        let nan = Color::new(f32::NAN, 0.0, 0.0);
        assert_eq!(ChannelOrder::Rgba.encode(nan)[0], 0);
    }

    #[test]
    fn test_decode_inverts_order() {
        let c = Color::new(0.9, 0.5, 0.1);
        for order in [ChannelOrder::Rgba, ChannelOrder::Bgra] {
            let (r, g, b) = order.decode(order.encode(c));
            assert_eq!((r, g, b), (229, 127, 25));
        }
    }
}
