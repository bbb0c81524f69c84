//! Sutherland-Hodgman frustum clipping in view space.
//!
//! Polygons are clipped plane by plane, each pass feeding the next. The
//! result is a new polygon that may have gained vertices (one per crossed
//! plane) or lost all of them (entirely outside, caller skips the draw).

use super::interpolate::lerp_payload;
use super::vertex::{ViewPolygon, ViewVertex};
use crate::math3d::{lerp, Vec3};

/// Half-space `normal . p + d >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Plane with a unit normal, so `distance` is in view-space units
    pub fn new(normal: Vec3, d: f32) -> Self {
        let len = normal.length();
        if len > 0.0 {
            Self {
                normal: normal * (1.0 / len),
                d: d / len,
            }
        } else {
            Self { normal, d }
        }
    }

    /// Signed distance; negative means outside
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(&p) + self.d
    }
}

/// Six inward-facing planes bounding the visible volume
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Symmetric perspective frustum for a camera at the origin looking down
    /// +z. `fov_y` is the vertical field of view in radians, `aspect` is
    /// width / height.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let ty = (fov_y / 2.0).tan();
        let tx = ty * aspect;
        Self::new([
            Plane::new(Vec3::new(0.0, 0.0, 1.0), -near),
            Plane::new(Vec3::new(0.0, 0.0, -1.0), far),
            Plane::new(Vec3::new(1.0, 0.0, tx), 0.0),
            Plane::new(Vec3::new(-1.0, 0.0, tx), 0.0),
            Plane::new(Vec3::new(0.0, 1.0, ty), 0.0),
            Plane::new(Vec3::new(0.0, -1.0, ty), 0.0),
        ])
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// True when `p` is inside every plane (within `epsilon`)
    pub fn contains(&self, p: Vec3, epsilon: f32) -> bool {
        self.planes.iter().all(|plane| plane.distance(p) >= -epsilon)
    }
}

/// Clip `polygon` against every plane of `frustum`.
///
/// Returns an empty polygon when nothing is left; payloads of new vertices
/// are interpolated at the crossing point.
pub fn clip_polygon(polygon: &ViewPolygon, frustum: &Frustum) -> ViewPolygon {
    let mut current = polygon.clone();
    for plane in frustum.planes() {
        if current.is_empty() {
            break;
        }
        current = clip_against_plane(&current, plane);
    }
    current
}

fn clip_against_plane(polygon: &ViewPolygon, plane: &Plane) -> ViewPolygon {
    let mut out = ViewPolygon::new(polygon.attributes());
    for (curr, next) in polygon.edges() {
        let d_curr = plane.distance(curr.pos);
        let d_next = plane.distance(next.pos);

        if d_curr >= 0.0 {
            out.push_unchecked(curr.clone());
        }
        if (d_curr >= 0.0) != (d_next >= 0.0) {
            // Signs differ, so the denominator is never zero
            let t = d_curr / (d_curr - d_next);
            out.push_unchecked(ViewVertex::new(
                lerp(curr.pos, next.pos, t),
                lerp_payload(&curr.payload, &next.payload, t),
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::vertex::Vertex;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn frustum() -> Frustum {
        // 90 degrees, square: side planes are x = +-z and y = +-z
        Frustum::perspective(FRAC_PI_2, 1.0, 1.0, 100.0)
    }

    fn polygon(points: &[(f32, f32, f32)]) -> ViewPolygon {
        ViewPolygon::from_vertices(
            points
                .iter()
                .map(|&(x, y, z)| Vertex::new(Vec3::new(x, y, z), vec![x, z]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_inside_polygon_is_unchanged() {
        let poly = polygon(&[(-1.0, -1.0, 5.0), (1.0, -1.0, 5.0), (0.0, 1.0, 6.0)]);
        assert_eq!(clip_polygon(&poly, &frustum()), poly);
    }

    #[test]
    fn test_one_vertex_outside_adds_a_vertex() {
        // Third vertex pokes through the right plane (x = z)
        let poly = polygon(&[(-1.0, -1.0, 5.0), (1.0, -1.0, 5.0), (9.0, 1.0, 5.0)]);
        let f = frustum();
        let clipped = clip_polygon(&poly, &f);
        assert_eq!(clipped.len(), 4);
        for v in clipped.vertices() {
            assert!(f.contains(v.pos, EPSILON), "{:?} outside", v.pos);
        }
    }

    #[test]
    fn test_fully_outside_is_empty() {
        let behind = polygon(&[(-1.0, -1.0, -5.0), (1.0, -1.0, -5.0), (0.0, 1.0, -5.0)]);
        let too_far = polygon(&[(-1.0, -1.0, 500.0), (1.0, -1.0, 500.0), (0.0, 1.0, 500.0)]);
        assert!(clip_polygon(&behind, &frustum()).is_empty());
        assert!(clip_polygon(&too_far, &frustum()).is_empty());
    }

    #[test]
    fn test_payload_follows_position() {
        // Payload is (x, z), so interpolated payloads must equal the new positions
        let poly = polygon(&[(0.0, 0.0, 0.2), (0.0, 0.5, 4.0), (0.5, 0.0, 4.0)]);
        let clipped = clip_polygon(&poly, &frustum());
        assert!(clipped.len() >= 3);
        for v in clipped.vertices() {
            assert!((v.payload[0] - v.pos.x).abs() < EPSILON);
            assert!((v.payload[1] - v.pos.z).abs() < EPSILON);
            assert!(v.pos.z >= 1.0 - EPSILON);
        }
    }

    #[test]
    fn test_large_polygon_clipped_to_all_planes() {
        // Much larger than the view volume in x and y, straddling the near plane
        let poly = polygon(&[(-50.0, -50.0, 0.5), (50.0, -50.0, 0.5), (50.0, 50.0, 20.0), (-50.0, 50.0, 20.0)]);
        let f = frustum();
        let clipped = clip_polygon(&poly, &f);
        assert!(clipped.len() >= 3);
        assert!(clipped.len() <= poly.len() + 6);
        for v in clipped.vertices() {
            assert!(f.contains(v.pos, EPSILON), "{:?} outside", v.pos);
        }
    }
}
