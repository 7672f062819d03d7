/// Screen-space primitives produced by projection and consumed by the
/// clippers and rasterizers. All of these live for a single frame.
use crate::meshing::{Color, Material};
use glam::Vec3;

/// Projected vertex: integer pixel position plus the attributes the
/// filler interpolates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex2D {
    pub x: i32,
    pub y: i32,
    /// Camera-space distance along the view axis (positive in front).
    pub z: f32,
    /// Surface normal, used by Phong.
    pub normal: Vec3,
    /// Lighting intensity, used by Gouraud.
    pub intensity: f32,
    /// World-space position, used when lighting is evaluated.
    pub world: Vec3,
}

impl Vertex2D {
    pub fn new(x: i32, y: i32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            normal: Vec3::Z,
            intensity: 1.0,
            world: Vec3::ZERO,
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_world(mut self, world: Vec3) -> Self {
        self.world = world;
        self
    }
}

/// Projected face. Borrows the material of the mesh it came from, so it can
/// never outlive that mesh.
#[derive(Clone, Debug)]
pub struct Polygon<'a> {
    pub vertices: Vec<Vertex2D>,
    pub material: &'a Material,
}

impl<'a> Polygon<'a> {
    pub fn new(material: &'a Material) -> Self {
        Self {
            vertices: Vec::new(),
            material,
        }
    }

    pub fn with_vertices(material: &'a Material, vertices: Vec<Vertex2D>) -> Self {
        Self { vertices, material }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when there are enough vertices left to enclose any area.
    #[inline]
    pub fn is_fillable(&self) -> bool {
        self.vertices.len() >= 3
    }
}

/// World-space segment with a color and a pixel width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line3D {
    pub p1: Vec3,
    pub p2: Vec3,
    pub color: Color,
    pub width: i32,
}

impl Line3D {
    pub fn new(p1: Vec3, p2: Vec3, color: Color, width: i32) -> Self {
        Self {
            p1,
            p2,
            color,
            width,
        }
    }

    /// Same line shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            p1: self.p1 + offset,
            p2: self.p2 + offset,
            ..*self
        }
    }
}

/// Screen-space segment with per-endpoint depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line2D {
    pub x1: i32,
    pub y1: i32,
    pub z1: f32,
    pub x2: i32,
    pub y2: i32,
    pub z2: f32,
    pub color: Color,
    pub width: i32,
}

impl Line2D {
    pub fn new(
        (x1, y1, z1): (i32, i32, f32),
        (x2, y2, z2): (i32, i32, f32),
        color: Color,
        width: i32,
    ) -> Self {
        Self {
            x1,
            y1,
            z1,
            x2,
            y2,
            z2,
            color,
            width,
        }
    }
}
