/// Lighting and shading models.
/// Kept separate from the rasterizer so lighting models
/// can evolve independently of the fill pipeline.
use super::primitives::Polygon;
use crate::meshing::{Color, Material};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Granularity at which the lighting equation is evaluated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Once per face.
    #[default]
    Flat,
    /// Once per vertex, interpolated across the face.
    Gouraud,
    /// Once per pixel from the interpolated normal and position.
    Phong,
}

impl ShadingMode {
    pub fn name(self) -> &'static str {
        match self {
            ShadingMode::Flat => "Flat",
            ShadingMode::Gouraud => "Gouraud",
            ShadingMode::Phong => "Phong",
        }
    }
}

/// Single point light.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Per-draw-call shading state produced by [`Shader::prepare`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadingContext {
    /// Face intensity used in flat mode.
    pub flat_intensity: f32,
}

impl Default for ShadingContext {
    fn default() -> Self {
        Self { flat_intensity: 1.0 }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Shader {
    pub mode: ShadingMode,
    pub light: Light,
    /// Camera eye, the view point for the specular term.
    pub eye: Vec3,
}

impl Default for Shader {
    fn default() -> Self {
        Self {
            mode: ShadingMode::Flat,
            light: Light::default(),
            eye: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

impl Shader {
    pub fn new(mode: ShadingMode, light: Light, eye: Vec3) -> Self {
        Self { mode, light, eye }
    }

    /// Evaluate the lighting equation at `position` with surface `normal`.
    /// Returns an intensity in [0, 1].
    pub fn intensity(&self, position: Vec3, normal: Vec3, material: &Material) -> f32 {
        let n = normal.normalize_or_zero();
        let l = (self.light.position - position).normalize_or_zero();
        let v = (self.eye - position).normalize_or_zero();
        let h = (l + v).normalize_or_zero();

        let diffuse = n.dot(l).max(0.0);
        // No highlight on faces turned away from the light.
        let specular = if diffuse > 0.0 {
            n.dot(h).max(0.0).powf(material.shininess)
        } else {
            0.0
        };

        let i = material.ka
            + material.kd * diffuse * self.light.intensity
            + material.ks * specular * self.light.intensity;
        i.clamp(0.0, 1.0)
    }

    /// Per-face work done before filling.
    ///
    /// Flat mode averages the polygon's positions and normals into a single
    /// intensity; Gouraud mode lights every vertex in place. Phong needs
    /// nothing up front.
    pub fn prepare(&self, polygon: &mut Polygon<'_>) -> ShadingContext {
        let mut ctx = ShadingContext::default();
        if polygon.is_empty() {
            return ctx;
        }

        match self.mode {
            ShadingMode::Flat => {
                let count = polygon.len() as f32;
                let center = polygon.vertices.iter().map(|v| v.world).sum::<Vec3>() / count;
                let normal = polygon.vertices.iter().map(|v| v.normal).sum::<Vec3>();
                ctx.flat_intensity = self.intensity(center, normal, polygon.material);
            }
            ShadingMode::Gouraud => {
                let material = polygon.material;
                for v in &mut polygon.vertices {
                    v.intensity = self.intensity(v.world, v.normal, material);
                }
            }
            ShadingMode::Phong => {}
        }
        ctx
    }

    /// Color for one pixel given its interpolated attributes.
    #[inline]
    pub fn shade_pixel(
        &self,
        material: &Material,
        ctx: &ShadingContext,
        intensity: f32,
        normal: Vec3,
        position: Vec3,
    ) -> Color {
        let i = match self.mode {
            ShadingMode::Flat => ctx.flat_intensity,
            ShadingMode::Gouraud => intensity,
            ShadingMode::Phong => self.intensity(position, normal, material),
        };
        material.color.modulate(i)
    }
}
