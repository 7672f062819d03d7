/// Interactive viewer
/// Handles window creation, input, and the render loop
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
use scanline_renderer::*;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

/// Pixels of trackpad scroll treated as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 20.0;

#[derive(thiserror::Error, Debug)]
enum ViewerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("presentation surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

type Surface = softbuffer::Surface<Arc<Window>, Arc<Window>>;

/// Everything the event handlers mutate.
struct Viewer {
    config: RendererConfig,
    scene: Scene,
    camera: Camera,
    controller: CameraController,
    rasterizer: Rasterizer,
    framebuffer: Framebuffer,
    stats: FrameStats,
    mouse: PhysicalPosition<f64>,
    rotating: bool,
}

impl Viewer {
    fn new(config: RendererConfig, width: usize, height: usize) -> Self {
        let mut rasterizer = Rasterizer::default();
        rasterizer.set_mode(config.shading);
        Self {
            scene: Scene::from_config(&config),
            camera: config.camera.build(),
            controller: CameraController::new(),
            rasterizer,
            framebuffer: Framebuffer::new(width, height),
            stats: FrameStats::new(config.stats_interval),
            mouse: PhysicalPosition::new(0.0, 0.0),
            rotating: false,
            config,
        }
    }

    /// Returns false when the viewer should close.
    fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> bool {
        // Held movement keys
        match key {
            KeyCode::KeyW => self.controller.forward_pressed = pressed,
            KeyCode::KeyS => self.controller.backward_pressed = pressed,
            KeyCode::KeyA => self.controller.left_pressed = pressed,
            KeyCode::KeyD => self.controller.right_pressed = pressed,
            KeyCode::KeyQ => self.controller.up_pressed = pressed,
            KeyCode::KeyE => self.controller.down_pressed = pressed,
            _ => {}
        }
        if !pressed || repeat {
            return true;
        }

        let look = self.camera.look;
        let material = self.scene.material;
        match key {
            KeyCode::Escape => return false,
            KeyCode::Digit1 => self.rasterizer.set_mode(ShadingMode::Flat),
            KeyCode::Digit2 => self.rasterizer.set_mode(ShadingMode::Gouraud),
            KeyCode::Digit3 => self.rasterizer.set_mode(ShadingMode::Phong),
            KeyCode::Digit7 => self.set_projection(ProjectionKind::Perspective),
            KeyCode::Digit8 => self.set_projection(ProjectionKind::Orthographic),
            KeyCode::Digit9 => self.set_move_mode(MoveMode::Fps),
            KeyCode::Digit0 => self.set_move_mode(MoveMode::Orbit),
            KeyCode::KeyT => self.camera.reset_pose(self.config.controls.reset_distance),
            KeyCode::KeyZ => {
                self.scene.shapes.create_sphere(material, look, 1.5, 12, 24);
            }
            KeyCode::KeyX => {
                self.scene.shapes.create_cylinder(material, look, 1.5, 2.0, 16);
            }
            KeyCode::KeyC => {
                self.scene.shapes.create_cube(material, look, 2.0);
            }
            KeyCode::KeyV => {
                self.scene.shapes.create_pyramid(material, look, 1.5, 1.5);
            }
            KeyCode::KeyO => self.scene.extrusion.begin_draw(),
            KeyCode::KeyP => {
                self.scene.extrusion.cycle_plane();
            }
            KeyCode::Space => {
                self.scene.confirm_extrusion();
            }
            KeyCode::F1 => FUNCTION_COUNTERS.snapshot().log_report(),
            _ => {}
        }
        true
    }

    fn set_projection(&mut self, projection: ProjectionKind) {
        self.camera.projection = projection;
        log::info!("camera projection: {}", projection.name());
    }

    fn set_move_mode(&mut self, mode: MoveMode) {
        self.camera.move_mode = mode;
        log::info!("camera mode: {}", mode.name());
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match button {
            MouseButton::Right => self.rotating = state == ElementState::Pressed,
            MouseButton::Left if state == ElementState::Pressed => {
                self.scene.extrusion.add_preview_vertex();
            }
            _ => {}
        }
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        let dx = (position.x - self.mouse.x) as f32;
        let dy = (position.y - self.mouse.y) as f32;
        self.mouse = position;
        if self.rotating {
            let sensitivity = self.config.controls.mouse_sensitivity;
            self.camera.add_x(dx * sensitivity);
            self.camera.add_y(-dy * sensitivity);
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_NOTCH) as f32,
        };
        self.camera.add_orbit_distance(-notches * self.config.controls.zoom_step);
    }

    fn update(&mut self, dt: f32) {
        self.controller
            .update_camera(&mut self.camera, self.config.controls.move_speed * dt);

        let (w, h) = (self.framebuffer.width(), self.framebuffer.height());
        let (mx, my) = (self.mouse.x as f32, self.mouse.y as f32);
        self.scene.extrusion.update_preview(&self.camera, mx, my, w, h);
    }

    fn render(&mut self) -> FrameReport {
        self.scene
            .render(&mut self.rasterizer, &self.camera, &mut self.framebuffer)
    }
}

fn present(surface: &mut Surface, framebuffer: &Framebuffer) -> Result<(), ViewerError> {
    let (Some(width), Some(height)) = (
        NonZeroU32::new(framebuffer.width() as u32),
        NonZeroU32::new(framebuffer.height() as u32),
    ) else {
        // Minimized
        return Ok(());
    };

    surface.resize(width, height)?;
    let mut buffer = surface.buffer_mut()?;
    buffer.copy_from_slice(framebuffer.color_buffer_slice());
    buffer.present()?;
    Ok(())
}

fn load_config() -> Result<RendererConfig, ViewerError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path);
            Ok(RendererConfig::load_from_file(&path)?)
        }
        None => Ok(RendererConfig::default()),
    }
}

fn main() -> Result<(), ViewerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("controls: WASD/QE move, right drag rotate, wheel zoom");
    log::info!("  1/2/3 flat/gouraud/phong, 7/8 perspective/ortho, 9/0 fps/orbit, T reset");
    log::info!("  Z/X/C/V sphere/cylinder/cube/pyramid, O draw, P plane, Space extrude, F1 counters");

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::PhysicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)?,
    );

    let context = softbuffer::Context::new(window.clone())?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())?;

    let size = window.inner_size();
    let mut viewer = Viewer::new(config, size.width as usize, size.height as usize);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(new_size) => {
                    viewer
                        .framebuffer
                        .resize(new_size.width as usize, new_size.height as usize);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        let pressed = event.state == ElementState::Pressed;
                        if !viewer.handle_key(key, pressed, event.repeat) {
                            elwt.exit();
                        }
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => viewer.handle_mouse_button(button, state),
                WindowEvent::CursorMoved { position, .. } => viewer.handle_cursor(position),
                WindowEvent::MouseWheel { delta, .. } => viewer.handle_wheel(delta),
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let dt = (now - last_frame).as_secs_f32();
                    last_frame = now;

                    viewer.update(dt);
                    viewer.render();
                    if let Err(err) = present(&mut surface, &viewer.framebuffer) {
                        log::error!("{}", err);
                        elwt.exit();
                    }
                    viewer.stats.record(now.elapsed());
                }
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn viewer() -> Viewer {
        Viewer::new(RendererConfig::default(), 64, 48)
    }

    #[test]
    fn number_keys_switch_modes() {
        let mut v = viewer();
        v.handle_key(KeyCode::Digit3, true, false);
        assert_eq!(v.rasterizer.mode(), ShadingMode::Phong);
        v.handle_key(KeyCode::Digit8, true, false);
        assert_eq!(v.camera.projection, ProjectionKind::Orthographic);
        v.handle_key(KeyCode::Digit9, true, false);
        assert_eq!(v.camera.move_mode, MoveMode::Fps);
        assert!(!v.handle_key(KeyCode::Escape, true, false));
    }

    #[test]
    fn shape_keys_add_at_look() {
        let mut v = viewer();
        v.camera.look = Vec3::new(3.0, 0.0, 0.0);
        let before = v.scene.shapes.len();
        v.handle_key(KeyCode::KeyC, true, false);
        v.handle_key(KeyCode::KeyC, true, true);
        assert_eq!(v.scene.shapes.len(), before + 1, "auto-repeat is ignored");
        let center = v.scene.shapes.objects[before].mesh.center();
        assert!((center - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn held_keys_move_camera() {
        let mut v = viewer();
        v.handle_key(KeyCode::KeyW, true, false);
        v.update(0.5);
        assert!(v.camera.eye.z < 5.0);
        v.handle_key(KeyCode::KeyW, false, false);
        assert!(!v.controller.is_moving());
    }

    #[test]
    fn render_fills_framebuffer() {
        let mut v = viewer();
        let report = v.render();
        assert!(report.pixels_filled > 0);
    }
}
