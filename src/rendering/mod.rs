/// Software rasterization pipeline
/// Projected polygons are clipped, pre-shaded and scan converted; lines are
/// clipped and plotted. Every stage writes through the depth-tested
/// framebuffer.
pub mod bresenham;
pub mod clipping;
pub mod framebuffer;
pub mod line_clip;
pub mod primitives;
pub mod rasterizer;
pub mod scanline;
pub mod shading;

pub use bresenham::plot_line;
pub use clipping::{clip_polygon, clip_polygon_to_screen, ClipRect};
pub use framebuffer::Framebuffer;
pub use line_clip::clip_line;
pub use primitives::{Line2D, Line3D, Polygon, Vertex2D};
pub use rasterizer::Rasterizer;
pub use scanline::{Frac, ScanlineFiller};
pub use shading::{Light, Shader, ShadingContext, ShadingMode};
