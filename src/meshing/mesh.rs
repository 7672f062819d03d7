/// Polyhedral mesh data: colors, materials, vertices and faces.
/// A `Polyhedron` is the only geometry the renderer consumes; everything
/// derived from it during a frame borrows its material.
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack into the framebuffer's 0xAARRGGBB layout.
    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Inverse of [`Color::pack`].
    #[inline]
    pub const fn unpack(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Scale r, g and b by `intensity`, clamping each channel to [0, 255].
    /// Alpha is left untouched.
    #[inline]
    pub fn modulate(self, intensity: f32) -> Self {
        let scale = |c: u8| ((c as f32 * intensity) as i32).clamp(0, 255) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Surface reflectance for the Phong lighting equation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Color,
    /// Ambient coefficient.
    pub ka: f32,
    /// Diffuse coefficient.
    pub kd: f32,
    /// Specular coefficient.
    pub ks: f32,
    pub shininess: f32,
}

impl Material {
    pub const RUBBER: Material = Material::preset(0.05, 0.5, 0.7, 10.24);
    pub const PLASTIC: Material = Material::preset(0.0, 0.5, 0.7, 32.0);
    pub const METAL: Material = Material::preset(0.2, 0.7, 0.6, 51.2);
    pub const STONE: Material = Material::preset(0.25, 0.95, 0.3, 11.24);

    const fn preset(ka: f32, kd: f32, ks: f32, shininess: f32) -> Self {
        Self {
            color: Color::WHITE,
            ka,
            kd,
            ks,
            shininess,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            ka: 0.1,
            kd: 0.8,
            ks: 0.2,
            shininess: 32.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex3D {
    pub position: Vec3,
    /// Intended to be unit length; not enforced.
    pub normal: Vec3,
}

impl Vertex3D {
    #[inline]
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Vertex index loop describing one convex, planar face.
/// Winding is counter-clockwise when seen from outside the solid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("face {face} has {len} vertices, at least 3 are required")]
    DegenerateFace { face: usize, len: usize },
}

/// One renderable solid: vertices, faces over those vertices and a material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyhedron {
    pub vertices: Vec<Vertex3D>,
    pub faces: Vec<Face>,
    pub material: Material,
}

impl Polyhedron {
    pub fn new(vertices: Vec<Vertex3D>, faces: Vec<Face>, material: Material) -> Self {
        Self {
            vertices,
            faces,
            material,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Check that every face is a polygon over this mesh's own vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: face_idx,
                    len: face.len(),
                });
            }
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Apply an affine transform: positions as points, normals as directions.
    pub fn transform(&mut self, matrix: &Mat4) {
        for v in &mut self.vertices {
            v.position = matrix.transform_point3(v.position);
            v.normal = matrix.transform_vector3(v.normal).normalize_or_zero();
        }
    }

    /// Centroid of the vertex positions, or the origin for an empty mesh.
    pub fn center(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.vertices.iter().map(|v| v.position).sum();
        sum / self.vertices.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_is_consistent() {
        let c = Color::new(12, 200, 7, 99);
        assert_eq!(Color::unpack(c.pack()), c);
        assert_eq!(Color::rgb(255, 0, 0).pack(), 0xFFFF0000);
    }

    #[test]
    fn modulate_clamps_and_keeps_alpha() {
        let c = Color::new(200, 100, 0, 17);
        assert_eq!(c.modulate(2.0), Color::new(255, 200, 0, 17));
        assert_eq!(c.modulate(0.5), Color::new(100, 50, 0, 17));
        assert_eq!(c.modulate(-1.0), Color::new(0, 0, 0, 17));
    }

    #[test]
    fn validate_rejects_foreign_indices() {
        let v = Vertex3D::new(Vec3::ZERO, Vec3::Z);
        let mesh = Polyhedron::new(vec![v; 3], vec![Face::new(vec![0, 1, 3])], Material::default());
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            })
        );

        let ok = Polyhedron::new(vec![v; 3], vec![Face::new(vec![0, 1, 2])], Material::default());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn transform_moves_points_but_not_normals() {
        let mut mesh = Polyhedron::new(
            vec![Vertex3D::new(Vec3::ZERO, Vec3::Y)],
            Vec::new(),
            Material::default(),
        );
        mesh.transform(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(mesh.vertices[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[0].normal, Vec3::Y);
    }
}
