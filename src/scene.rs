/// Scene: everything drawn in a frame, and the fixed order it is drawn in.
use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::meshing::{Color, ExtrusionState, Material, Shapes};
use crate::perf_scope;
use crate::rendering::{Framebuffer, Light, Line3D, Rasterizer};
use glam::Vec3;

/// Indexed list of world-space lines.
#[derive(Clone, Debug, Default)]
pub struct Lines {
    objects: Vec<Line3D>,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return its index.
    pub fn add(&mut self, p1: Vec3, p2: Vec3, color: Color, width: i32) -> usize {
        self.objects.push(Line3D::new(p1, p2, color, width));
        self.objects.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Line3D> {
        self.objects.get(index)
    }

    pub fn set_endpoints(&mut self, index: usize, p1: Vec3, p2: Vec3) -> bool {
        self.objects
            .get_mut(index)
            .map(|l| {
                l.p1 = p1;
                l.p2 = p2;
            })
            .is_some()
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> bool {
        self.objects.get_mut(index).map(|l| l.color = color).is_some()
    }

    pub fn set_width(&mut self, index: usize, width: i32) -> bool {
        self.objects.get_mut(index).map(|l| l.width = width).is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line3D> {
        self.objects.iter()
    }

    /// Red X, green Y and blue Z lines from `-extent` to `+extent`.
    pub fn axes(extent: f32) -> Self {
        let mut lines = Self::new();
        lines.add(Vec3::NEG_X * extent, Vec3::X * extent, Color::RED, 1);
        lines.add(Vec3::NEG_Y * extent, Vec3::Y * extent, Color::GREEN, 1);
        lines.add(Vec3::NEG_Z * extent, Vec3::Z * extent, Color::BLUE, 1);
        lines
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Line3D;
    type IntoIter = std::slice::Iter<'a, Line3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Counts from one [`Scene::render`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Pixels written by solids.
    pub pixels_filled: usize,
    /// Lines with a visible part.
    pub lines_drawn: usize,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub shapes: Shapes,
    /// World reference axes
    pub axes: Lines,
    /// Small axes drawn around the camera's look point
    pub gizmo: Lines,
    pub extrusion: ExtrusionState,
    pub light: Light,
    /// Material for new solids
    pub material: Material,
    pub clear_color: Color,
    pub clear_depth: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

impl Scene {
    pub const AXIS_EXTENT: f32 = 5.0;
    pub const GIZMO_SIZE: f32 = 0.5;

    /// Empty scene with axes and gizmo, lit and cleared per `config`.
    pub fn empty(config: &RendererConfig) -> Self {
        Self {
            shapes: Shapes::new(),
            axes: Lines::axes(Self::AXIS_EXTENT),
            gizmo: Lines::axes(Self::GIZMO_SIZE),
            extrusion: ExtrusionState::new(),
            light: config.light,
            material: config.material,
            clear_color: config.clear_color,
            clear_depth: config.clear_depth,
        }
    }

    /// Starting scene: a cube of edge 2 at the origin.
    pub fn from_config(config: &RendererConfig) -> Self {
        let mut scene = Self::empty(config);
        scene.shapes.create_cube(scene.material, Vec3::ZERO, 2.0);
        scene
    }

    /// Commit the extrusion in progress, if any, as a new solid.
    pub fn confirm_extrusion(&mut self) -> bool {
        match self.extrusion.confirm(self.material) {
            Some(mesh) => {
                self.shapes.push(mesh);
                true
            }
            None => false,
        }
    }

    /// Draw a complete frame: clear, solids, axes, look gizmo, then the
    /// extrusion outline and preview.
    pub fn render(&self, rasterizer: &mut Rasterizer, camera: &Camera, framebuffer: &mut Framebuffer) -> FrameReport {
        perf_scope!("scene.render");
        let mut report = FrameReport::default();

        framebuffer.clear(self.clear_color);
        framebuffer.clear_depth(self.clear_depth);
        rasterizer.set_light(self.light);
        rasterizer.set_eye(camera.eye);

        for shape in &self.shapes.objects {
            report.pixels_filled += rasterizer.render_mesh(&shape.mesh, camera, framebuffer);
        }

        let gizmo = self.gizmo.iter().map(|l| l.translated(camera.look));
        let outline = self.extrusion.outline();
        for line in self.axes.iter().copied().chain(gizmo).chain(outline) {
            if rasterizer.draw_line(&line, camera, framebuffer) {
                report.lines_drawn += 1;
            }
        }

        if let Some(preview) = self.extrusion.preview_solid(self.material) {
            report.pixels_filled += rasterizer.render_mesh(&preview, camera, framebuffer);
        }

        log::trace!(
            "frame: {} solids, {} pixels, {} lines",
            self.shapes.len(),
            report.pixels_filled,
            report.lines_drawn
        );
        report
    }
}
