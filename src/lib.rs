pub mod camera;
pub mod config;
pub mod meshing;
pub mod perf;
pub mod rendering;
/// Scanline renderer - CPU rasterization of shaded polyhedra
/// Built from small, separately testable pipeline stages
pub mod scene;

pub use camera::{Camera, CameraController, MoveMode, ProjectionKind};
pub use config::{ConfigError, RendererConfig};
pub use meshing::{Color, ExtrusionState, Face, Material, MeshError, Polyhedron, Shapes, Vertex3D};
pub use perf::{CounterSnapshot, FrameStats, FunctionCounters, FUNCTION_COUNTERS};
pub use rendering::{Framebuffer, Light, Rasterizer, Shader, ShadingMode};
pub use scene::{FrameReport, Lines, Scene};
