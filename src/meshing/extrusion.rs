/// Interactive polygon drawing and extrusion into solids.
///
/// A polygon is drawn point by point on one of the three axis planes through
/// the origin, then pulled along that plane's normal to form a prism.
use super::mesh::{Color, Face, Material, Polyhedron, Vertex3D};
use crate::camera::Camera;
use crate::rendering::primitives::Line3D;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rays closer than this to parallel with the draw plane miss it.
const PLANE_PARALLEL_EPS: f32 = 1e-5;
/// Same, for the depth probe plane used while extruding.
const PROBE_PARALLEL_EPS: f32 = 1e-3;

pub const OUTLINE_COLOR: Color = Color::YELLOW;
pub const PREVIEW_LINE_COLOR: Color = Color::WHITE;
pub const PREVIEW_SOLID_COLOR: Color = Color::rgb(50, 200, 200);
pub const OUTLINE_WIDTH: i32 = 2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPlane {
    /// z = 0, extrudes along +Z
    #[default]
    XY,
    /// y = 0, extrudes along +Y
    XZ,
    /// x = 0, extrudes along +X
    YZ,
}

impl DrawPlane {
    pub fn name(self) -> &'static str {
        match self {
            DrawPlane::XY => "XY",
            DrawPlane::XZ => "XZ",
            DrawPlane::YZ => "YZ",
        }
    }

    /// XY → XZ → YZ → XY
    pub fn next(self) -> Self {
        match self {
            DrawPlane::XY => DrawPlane::XZ,
            DrawPlane::XZ => DrawPlane::YZ,
            DrawPlane::YZ => DrawPlane::XY,
        }
    }

    /// Plane normal, which is also the extrusion direction.
    pub fn normal(self) -> Vec3 {
        match self {
            DrawPlane::XY => Vec3::Z,
            DrawPlane::XZ => Vec3::Y,
            DrawPlane::YZ => Vec3::X,
        }
    }

    /// Coordinate of `p` along the plane normal.
    #[inline]
    fn height_of(self, p: Vec3) -> f32 {
        p.dot(self.normal())
    }

    /// Normal of the plane that contains the extrusion axis and is probed
    /// by the mouse ray to choose the extrusion depth.
    fn probe_normal(self) -> Vec3 {
        match self {
            DrawPlane::XY => Vec3::X,
            DrawPlane::XZ => Vec3::Z,
            DrawPlane::YZ => Vec3::Y,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Hit point with the plane through `point` with normal `normal`, if it
    /// lies in front of the origin.
    fn hit_plane(&self, point: Vec3, normal: Vec3, eps: f32) -> Option<Vec3> {
        let denom = self.direction.dot(normal);
        if denom.abs() < eps {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// Ray from the camera through the mouse position in pixels.
pub fn screen_to_world_ray(camera: &Camera, mouse_x: f32, mouse_y: f32, width: usize, height: usize) -> Ray {
    let (origin, direction) = camera.screen_ray(mouse_x, mouse_y, width, height);
    Ray { origin, direction }
}

/// Where `ray` meets the draw plane through the origin, if in front of it.
pub fn intersect_draw_plane(ray: &Ray, plane: DrawPlane) -> Option<Vec3> {
    ray.hit_plane(Vec3::ZERO, plane.normal(), PLANE_PARALLEL_EPS)
}

/// Prism over `base` pushed `depth` along the plane normal.
///
/// Vertices `0..n` are the base and `n..2n` the top. Faces are the base in
/// drawing order, the top reversed, then one quad per base edge. Vertex
/// normals are the normalized sum of the normals of the faces using them.
/// Returns None for fewer than three base points.
pub fn create_extruded_polyhedron(base: &[Vec3], plane: DrawPlane, depth: f32, material: Material) -> Option<Polyhedron> {
    let n = base.len();
    if n < 3 {
        return None;
    }

    let offset = plane.normal() * depth;
    let mut vertices: Vec<Vertex3D> = base
        .iter()
        .chain(base.iter())
        .enumerate()
        .map(|(i, &p)| {
            let position = if i < n { p } else { p + offset };
            Vertex3D::new(position, Vec3::ZERO)
        })
        .collect();

    let mut faces = Vec::with_capacity(n + 2);
    faces.push(Face::new((0..n).collect::<Vec<_>>()));
    faces.push(Face::new((0..n).rev().map(|i| n + i).collect::<Vec<_>>()));
    for i in 0..n {
        let next = (i + 1) % n;
        faces.push(Face::new([i, next, n + next, n + i]));
    }

    for face in &faces {
        let [a, b, c] = [face.indices[0], face.indices[1], face.indices[2]];
        let (p0, p1, p2) = (vertices[a].position, vertices[b].position, vertices[c].position);
        let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
        for &index in &face.indices {
            vertices[index].normal += normal;
        }
    }

    for v in &mut vertices {
        v.normal = if v.normal.length() > 1e-6 {
            v.normal.normalize()
        } else {
            Vec3::Y
        };
    }

    Some(Polyhedron::new(vertices, faces, material))
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    None,
    /// Clicking adds points on the draw plane.
    Draw,
    /// Mouse movement sets the extrusion depth.
    Extrude,
}

/// Draw / extrude editing state.
#[derive(Clone, Debug, Default)]
pub struct ExtrusionState {
    pub mode: EditMode,
    pub plane: DrawPlane,
    pub polygon: Vec<Vec3>,
    /// Point under the mouse on the draw plane, if any.
    pub preview: Option<Vec3>,
    pub depth: f32,
    pub start_point: Vec3,
}

impl ExtrusionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh polygon.
    pub fn begin_draw(&mut self) {
        self.mode = EditMode::Draw;
        self.polygon.clear();
        self.preview = None;
        log::debug!("draw mode on plane {}", self.plane.name());
    }

    pub fn cycle_plane(&mut self) -> DrawPlane {
        self.plane = self.plane.next();
        log::info!("draw plane: {}", self.plane.name());
        self.plane
    }

    /// Append the current preview point. Returns false when not drawing or
    /// the mouse is off the plane.
    pub fn add_preview_vertex(&mut self) -> bool {
        match (self.mode, self.preview) {
            (EditMode::Draw, Some(p)) => {
                self.polygon.push(p);
                log::debug!("vertex added ({} total)", self.polygon.len());
                true
            }
            _ => false,
        }
    }

    /// Track the mouse: in draw mode the preview point follows the draw
    /// plane; in extrude mode the depth follows the probe plane through
    /// `camera.look`.
    pub fn update_preview(&mut self, camera: &Camera, mouse_x: f32, mouse_y: f32, width: usize, height: usize) {
        let ray = screen_to_world_ray(camera, mouse_x, mouse_y, width, height);
        match self.mode {
            EditMode::None => {}
            EditMode::Draw => self.preview = intersect_draw_plane(&ray, self.plane),
            EditMode::Extrude => {
                if self.polygon.len() < 3 {
                    return;
                }
                let hit = ray.hit_plane(camera.look, self.plane.probe_normal(), PROBE_PARALLEL_EPS);
                if let Some(hit) = hit {
                    self.depth = self.extrude_depth(hit);
                }
            }
        }
    }

    /// Signed distance of `point` from the start point along the plane normal.
    pub fn extrude_depth(&self, point: Vec3) -> f32 {
        if self.polygon.is_empty() {
            return 0.0;
        }
        self.plane.height_of(point) - self.plane.height_of(self.start_point)
    }

    /// Switch from drawing to extruding. Needs at least three points.
    pub fn begin_extrude(&mut self) -> bool {
        if self.mode != EditMode::Draw || self.polygon.len() < 3 {
            return false;
        }
        self.mode = EditMode::Extrude;
        self.depth = 0.0;
        self.start_point = self.polygon[0];
        true
    }

    /// Build the solid and leave edit mode. Returns None when not extruding.
    pub fn finish(&mut self, material: Material) -> Option<Polyhedron> {
        if self.mode != EditMode::Extrude {
            return None;
        }
        let solid = create_extruded_polyhedron(&self.polygon, self.plane, self.depth, material);
        self.mode = EditMode::None;
        self.polygon.clear();
        self.preview = None;
        if let Some(mesh) = &solid {
            log::info!("extruded solid: {} faces, depth {:.2}", mesh.faces.len(), self.depth);
        }
        solid
    }

    /// The confirm key: starts extruding from draw mode, finishes from
    /// extrude mode.
    pub fn confirm(&mut self, material: Material) -> Option<Polyhedron> {
        match self.mode {
            EditMode::Draw => {
                self.begin_extrude();
                None
            }
            EditMode::Extrude => self.finish(material),
            EditMode::None => None,
        }
    }

    /// Outline of the polygon drawn so far plus the rubber band to the mouse.
    pub fn outline(&self) -> Vec<Line3D> {
        if self.mode != EditMode::Draw {
            return Vec::new();
        }
        let mut lines: Vec<Line3D> = self
            .polygon
            .windows(2)
            .map(|w| Line3D::new(w[0], w[1], OUTLINE_COLOR, OUTLINE_WIDTH))
            .collect();
        if let (Some(&last), Some(preview)) = (self.polygon.last(), self.preview) {
            lines.push(Line3D::new(last, preview, PREVIEW_LINE_COLOR, OUTLINE_WIDTH));
        }
        lines
    }

    /// Solid shown while extruding, in the preview color.
    pub fn preview_solid(&self, material: Material) -> Option<Polyhedron> {
        if self.mode != EditMode::Extrude {
            return None;
        }
        create_extruded_polyhedron(&self.polygon, self.plane, self.depth, material.with_color(PREVIEW_SOLID_COLOR))
    }
}
