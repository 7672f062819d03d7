/// Cohen–Sutherland clipping of screen-space segments, carrying depth.
use super::clipping::ClipRect;
use super::primitives::Line2D;

// region codes
const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

const PARALLEL_EPS: f32 = 1e-6;

#[inline]
fn outcode(x: i32, y: i32, rect: &ClipRect) -> u8 {
    let mut code = INSIDE;
    if x < rect.xmin {
        code |= LEFT;
    } else if x > rect.xmax {
        code |= RIGHT;
    }
    if y < rect.ymin {
        code |= BOTTOM;
    } else if y > rect.ymax {
        code |= TOP;
    }
    code
}

#[inline]
fn param(num: i32, den: i32) -> f32 {
    let den = if den != 0 { den as f32 } else { PARALLEL_EPS };
    num as f32 / den
}

/// Clip `line` to `rect` in place. Returns false, leaving the line untouched,
/// when no part of it is visible.
pub fn clip_line(line: &mut Line2D, rect: ClipRect) -> bool {
    let (mut x0, mut y0, mut z0) = (line.x1, line.y1, line.z1);
    let (mut x1, mut y1, mut z1) = (line.x2, line.y2, line.z2);

    let mut out0 = outcode(x0, y0, &rect);
    let mut out1 = outcode(x1, y1, &rect);

    loop {
        if out0 | out1 == INSIDE {
            break;
        }
        if out0 & out1 != 0 {
            return false;
        }

        let out = if out0 != INSIDE { out0 } else { out1 };

        // Boundary priority: top, bottom, right, left.
        let (x, y, t) = if out & TOP != 0 {
            let t = param(rect.ymax - y0, y1 - y0);
            (x0 as f32 + t * (x1 - x0) as f32, rect.ymax as f32, t)
        } else if out & BOTTOM != 0 {
            let t = param(rect.ymin - y0, y1 - y0);
            (x0 as f32 + t * (x1 - x0) as f32, rect.ymin as f32, t)
        } else if out & RIGHT != 0 {
            let t = param(rect.xmax - x0, x1 - x0);
            (rect.xmax as f32, y0 as f32 + t * (y1 - y0) as f32, t)
        } else {
            let t = param(rect.xmin - x0, x1 - x0);
            (rect.xmin as f32, y0 as f32 + t * (y1 - y0) as f32, t)
        };
        let z = z0 + t * (z1 - z0);

        if out == out0 {
            (x0, y0, z0) = (x as i32, y as i32, z);
            out0 = outcode(x0, y0, &rect);
        } else {
            (x1, y1, z1) = (x as i32, y as i32, z);
            out1 = outcode(x1, y1, &rect);
        }
    }

    (line.x1, line.y1, line.z1) = (x0, y0, z0);
    (line.x2, line.y2, line.z2) = (x1, y1, z1);
    true
}
