/// Integer midpoint line rasterizer with per-pixel depth and a square pen.
use super::framebuffer::Framebuffer;
use super::primitives::Line2D;
use crate::meshing::Color;
use crate::perf::FUNCTION_COUNTERS;
use crate::count_call;

/// Write a `(2*(width/2)+1)`-sided square centered on `(x, y)`.
/// Widths of 0 or 1 give a single pixel.
#[inline]
pub fn stamp(x: i32, y: i32, z: f32, color: Color, width: i32, framebuffer: &mut Framebuffer) {
    let half = (width / 2).max(0);
    for dy in -half..=half {
        for dx in -half..=half {
            framebuffer.set(x + dx, y + dy, z, color);
        }
    }
}

/// Rasterize `line` in any octant, interpolating depth by step index.
///
/// The major axis is x when `|dx| > |dy|`, y otherwise. Each of the
/// `major` steps advances one pixel along the major axis and, when the
/// decision variable is non-negative, one along the minor axis too.
pub fn plot_line(line: &Line2D, framebuffer: &mut Framebuffer) {
    count_call!(FUNCTION_COUNTERS.lines_plotted);

    let sx = if line.x2 >= line.x1 { 1 } else { -1 };
    let sy = if line.y2 >= line.y1 { 1 } else { -1 };
    let dx = (line.x2 - line.x1).abs();
    let dy = (line.y2 - line.y1).abs();

    let x_major = dx > dy;
    let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
    let delta_e = 2 * minor;
    let delta_ne = 2 * (minor - major);
    let mut d = 2 * minor - major;

    let (mut x, mut y) = (line.x1, line.y1);
    stamp(x, y, line.z1, line.color, line.width, framebuffer);

    for step in 1..=major {
        if d < 0 {
            d += delta_e;
            if x_major {
                x += sx;
            } else {
                y += sy;
            }
        } else {
            d += delta_ne;
            x += sx;
            y += sy;
        }

        let t = step as f32 / major as f32;
        let z = line.z1 + (line.z2 - line.z1) * t;
        stamp(x, y, z, line.color, line.width, framebuffer);
    }
}
