/// Software rasterizer: drives meshes and lines through projection,
/// clipping, pre-shading and scan conversion into a framebuffer.
use super::bresenham::plot_line;
use super::clipping::ClipRect;
use super::framebuffer::Framebuffer;
use super::line_clip::clip_line;
use super::primitives::Line3D;
use super::scanline::ScanlineFiller;
use super::shading::{Light, Shader, ShadingMode};
use crate::camera::Camera;
use crate::meshing::{Face, Polyhedron};
use crate::perf::FUNCTION_COUNTERS;
use crate::count_call;
use glam::Vec3;

#[derive(Default)]
pub struct Rasterizer {
    pub shader: Shader,
    // Scratch edge tables reused across faces.
    filler: ScanlineFiller,
}

impl Rasterizer {
    pub fn new(shader: Shader) -> Self {
        Self {
            shader,
            filler: ScanlineFiller::new(),
        }
    }

    pub fn mode(&self) -> ShadingMode {
        self.shader.mode
    }

    pub fn set_mode(&mut self, mode: ShadingMode) {
        if self.shader.mode != mode {
            log::info!("shading mode: {}", mode.name());
        }
        self.shader.mode = mode;
    }

    pub fn set_light(&mut self, light: Light) {
        self.shader.light = light;
    }

    /// Viewpoint for the specular term. Call once per frame before drawing.
    pub fn set_eye(&mut self, eye: Vec3) {
        self.shader.eye = eye;
    }

    /// Draw one face. Returns the number of pixels that passed the depth test.
    pub fn render_face(&mut self, mesh: &Polyhedron, face: &Face, camera: &Camera, framebuffer: &mut Framebuffer) -> usize {
        let (width, height) = (framebuffer.width(), framebuffer.height());
        let mut polygon = camera.project_and_clip(mesh, face, width, height);
        if !polygon.is_fillable() {
            return 0;
        }
        let ctx = self.shader.prepare(&mut polygon);
        self.filler.fill(&polygon, &self.shader, &ctx, framebuffer)
    }

    /// Draw every face of `mesh`. Returns the number of pixels written.
    pub fn render_mesh(&mut self, mesh: &Polyhedron, camera: &Camera, framebuffer: &mut Framebuffer) -> usize {
        mesh.faces
            .iter()
            .map(|face| self.render_face(mesh, face, camera, framebuffer))
            .sum()
    }

    /// Project, clip and plot a world-space line. Returns false when nothing
    /// of it is visible.
    pub fn draw_line(&self, line: &Line3D, camera: &Camera, framebuffer: &mut Framebuffer) -> bool {
        let (width, height) = (framebuffer.width(), framebuffer.height());
        let Some(mut projected) = camera.project_line(line, width, height) else {
            return false;
        };
        if !clip_line(&mut projected, ClipRect::screen(width as i32, height as i32)) {
            count_call!(FUNCTION_COUNTERS.lines_clipped_away);
            return false;
        }
        plot_line(&projected, framebuffer);
        true
    }
}
