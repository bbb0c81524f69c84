//! Vertices with an attribute payload, and closed polygons built from them.
//!
//! The payload is a fixed-width vector of floats per polygon. The fills read
//! it by channel index: r, g, b first, then texture u, v.

use crate::display::Color;
use crate::error::{RasterError, Result};
use crate::math3d::{project, Vec3};

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const TEX_U: usize = 3;
pub const TEX_V: usize = 4;

/// Payload width needed by `draw_polygon_blended`
pub const COLOR_ATTRIBUTES: usize = 3;
/// Payload width needed by `draw_polygon_textured`
pub const TEXTURED_ATTRIBUTES: usize = 5;

/// Integer screen position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A position plus its attribute payload
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<P> {
    pub pos: P,
    pub payload: Vec<f32>,
}

pub type ScreenVertex = Vertex<Point>;
pub type ViewVertex = Vertex<Vec3>;

impl<P> Vertex<P> {
    pub fn new(pos: P, payload: Vec<f32>) -> Self {
        Self { pos, payload }
    }
}

impl Vertex<Point> {
    /// Screen vertex at (x, y)
    pub fn at(x: i32, y: i32, payload: Vec<f32>) -> Self {
        Self::new(Point { x, y }, payload)
    }

    /// Screen vertex carrying only a color
    pub fn colored(x: i32, y: i32, color: Color) -> Self {
        Self::at(x, y, vec![color.r, color.g, color.b])
    }

    /// Screen vertex carrying a light color and texture coordinates
    pub fn textured(x: i32, y: i32, color: Color, u: f32, v: f32) -> Self {
        Self::at(x, y, vec![color.r, color.g, color.b, u, v])
    }
}

/// Closed loop of vertices; the last vertex connects back to the first.
///
/// Every vertex carries the same number of attributes. Fewer than 3 vertices
/// is a valid value that simply draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P> {
    vertices: Vec<Vertex<P>>,
    attributes: usize,
}

pub type ScreenPolygon = Polygon<Point>;
pub type ViewPolygon = Polygon<Vec3>;

impl<P> Polygon<P> {
    /// Empty polygon whose vertices will carry `attributes` floats each
    pub fn new(attributes: usize) -> Self {
        Self {
            vertices: Vec::new(),
            attributes,
        }
    }

    /// Build from a vertex list; the first vertex fixes the payload width
    pub fn from_vertices(vertices: Vec<Vertex<P>>) -> Result<Self> {
        let attributes = vertices.first().map_or(0, |v| v.payload.len());
        let mut polygon = Self::new(attributes);
        polygon.vertices.reserve(vertices.len());
        for v in vertices {
            polygon.push(v)?;
        }
        Ok(polygon)
    }

    pub fn push(&mut self, vertex: Vertex<P>) -> Result<()> {
        if vertex.payload.len() != self.attributes {
            return Err(RasterError::PayloadWidth {
                expected: self.attributes,
                got: vertex.payload.len(),
            });
        }
        self.vertices.push(vertex);
        Ok(())
    }

    /// Used by the clipper, which only ever emits full-width payloads
    pub(crate) fn push_unchecked(&mut self, vertex: Vertex<P>) {
        debug_assert_eq!(vertex.payload.len(), self.attributes);
        self.vertices.push(vertex);
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex<P>] {
        &self.vertices
    }

    #[inline]
    pub fn attributes(&self) -> usize {
        self.attributes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// At least a triangle
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Edges in order, including the closing edge from last to first
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex<P>, &Vertex<P>)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}

impl Polygon<Vec3> {
    /// Perspective-project to integer screen coordinates.
    ///
    /// `focal` is the eye-to-image-plane distance in pixels (see
    /// `math3d::focal_length`). Vertices at or behind the eye are dropped;
    /// after a near-plane clip there are none.
    pub fn project(&self, focal: f32, width: u32, height: u32) -> ScreenPolygon {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let mut out = Polygon::new(self.attributes);
        for v in &self.vertices {
            if let Some((sx, sy)) = project(v.pos, focal, cx, cy) {
                out.push_unchecked(Vertex::at(
                    sx.floor() as i32,
                    sy.floor() as i32,
                    v.payload.clone(),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_width_is_enforced() {
        let mut poly = ScreenPolygon::new(3);
        assert!(poly.push(Vertex::colored(0, 0, Color::RED)).is_ok());
        let err = poly.push(Vertex::at(1, 1, vec![1.0])).unwrap_err();
        assert!(matches!(err, RasterError::PayloadWidth { expected: 3, got: 1 }));
        assert_eq!(poly.len(), 1);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let poly = ScreenPolygon::from_vertices(vec![
            Vertex::at(0, 0, vec![]),
            Vertex::at(5, 0, vec![]),
            Vertex::at(5, 5, vec![]),
        ])
        .unwrap();
        let edges: Vec<_> = poly.edges().map(|(a, b)| (a.pos, b.pos)).collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (Point { x: 5, y: 5 }, Point { x: 0, y: 0 }));
    }

    #[test]
    fn test_project_centers_axis_point() {
        let poly = ViewPolygon::from_vertices(vec![
            Vertex::new(Vec3::new(0.0, 0.0, 2.0), vec![0.5]),
            Vertex::new(Vec3::new(1.0, -1.0, 2.0), vec![0.5]),
            Vertex::new(Vec3::new(0.0, 0.0, -1.0), vec![0.5]),
        ])
        .unwrap();
        let screen = poly.project(100.0, 200, 100);
        // The vertex behind the eye is dropped
        assert_eq!(screen.len(), 2);
        assert_eq!(screen.vertices()[0].pos, Point { x: 100, y: 50 });
        assert_eq!(screen.vertices()[1].pos, Point { x: 150, y: 0 });
        assert_eq!(screen.attributes(), 1);
    }
}
