//! 3D math for the view-space side of the pipeline
//!
//! View space: camera at the origin looking down +z, +x to the right and +y
//! down, so projected coordinates land directly in screen orientation.

use std::ops::{Add, Mul};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotate around X axis
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y axis
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Project a 3D point to 2D screen coordinates
///
/// - `point`: The 3D point to project
/// - `focal`: Distance from eye to projection plane, in pixels
/// - `cx`, `cy`: Screen center coordinates
///
/// Returns None if the point is at or behind the camera (z <= 0)
#[inline]
pub fn project(point: Vec3, focal: f32, cx: f32, cy: f32) -> Option<(f32, f32)> {
    if point.z <= 0.0 {
        return None;
    }
    let scale = focal / point.z;
    Some((cx + point.x * scale, cy + point.y * scale))
}

/// Focal length (in pixels) giving a vertical field of view of `fov_y`
/// radians on a screen `height` pixels tall
#[inline]
pub fn focal_length(fov_y: f32, height: u32) -> f32 {
    height as f32 / 2.0 / (fov_y / 2.0).tan()
}

/// `a + t * (b - a)`; `t` is not clamped, the clipper only passes [0, 1]
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, a.z + (b.z - a.z) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_project_behind_camera() {
        assert_eq!(project(Vec3::new(1.0, 1.0, 0.0), 100.0, 0.0, 0.0), None);
        assert_eq!(project(Vec3::new(1.0, 1.0, -3.0), 100.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_focal_length_maps_frustum_edge_to_screen_edge() {
        // 90 degree vertical fov: y == z sits on the top/bottom edge
        let f = focal_length(FRAC_PI_2, 480);
        let (_, sy) = project(Vec3::new(0.0, 2.0, 2.0), f, 320.0, 240.0).unwrap();
        assert!((sy - 480.0).abs() < 1e-3, "got {}", sy);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let v = Vec3::new(1.0, 0.0, 0.0).rotate_y(FRAC_PI_2);
        assert!(v.x.abs() < 1e-6 && v.y == 0.0 && (v.z + 1.0).abs() < 1e-6, "{:?}", v);
    }

    #[test]
    fn test_rotate_x_then_y_keeps_length() {
        let v = Vec3::new(1.6, -1.6, 0.0);
        let r = v.rotate_x(0.3).rotate_y(0.6);
        assert!((r.length() - v.length()).abs() < 1e-5);

        // Pitch a point on +y onto +z, then yaw it onto +x
        let p = Vec3::new(0.0, 1.0, 0.0).rotate_x(FRAC_PI_2).rotate_y(FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-6 && p.y.abs() < 1e-6 && p.z.abs() < 1e-6, "{:?}", p);
    }
}
