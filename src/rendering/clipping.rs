/// Sutherland–Hodgman clipping of projected polygons against the viewport.
/// Every interpolated attribute (depth, normal, intensity, world position)
/// is carried across the new vertices created on the clip boundary.
use super::primitives::{Polygon, Vertex2D};
use crate::count_call;
use crate::perf::FUNCTION_COUNTERS;
use glam::Vec3;

/// Substituted for a zero denominator when an edge runs parallel to a boundary.
const PARALLEL_EPS: f32 = 1e-6;

/// Inclusive pixel rectangle `[xmin, xmax] x [ymin, ymax]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl ClipRect {
    pub const fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// The full screen `[0, w-1] x [0, h-1]`.
    pub const fn screen(width: i32, height: i32) -> Self {
        Self::new(0, 0, width - 1, height - 1)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

/// Float copy of a vertex so intersections keep sub-pixel precision until
/// the final rounding.
#[derive(Copy, Clone, Debug)]
struct ClipVertex {
    x: f32,
    y: f32,
    z: f32,
    normal: Vec3,
    intensity: f32,
    world: Vec3,
}

impl ClipVertex {
    fn from_vertex(v: &Vertex2D) -> Self {
        Self {
            x: v.x as f32,
            y: v.y as f32,
            z: v.z,
            normal: v.normal,
            intensity: v.intensity,
            world: v.world,
        }
    }

    fn to_vertex(self) -> Vertex2D {
        Vertex2D {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
            z: self.z,
            normal: self.normal.normalize_or_zero(),
            intensity: self.intensity,
            world: self.world,
        }
    }

    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
            normal: self.normal.lerp(other.normal, t),
            intensity: self.intensity + (other.intensity - self.intensity) * t,
            world: self.world.lerp(other.world, t),
        }
    }
}

/// One half-plane of the clip rectangle, in processing order.
#[derive(Copy, Clone, Debug)]
enum Boundary {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl Boundary {
    #[inline]
    fn inside(self, v: &ClipVertex) -> bool {
        match self {
            Boundary::Left(x) => v.x >= x,
            Boundary::Right(x) => v.x <= x,
            Boundary::Top(y) => v.y >= y,
            Boundary::Bottom(y) => v.y <= y,
        }
    }

    /// Point where segment S→P crosses this boundary.
    #[inline]
    fn intersect(self, s: &ClipVertex, p: &ClipVertex) -> ClipVertex {
        let guard = |d: f32| if d != 0.0 { d } else { PARALLEL_EPS };
        let t = match self {
            Boundary::Left(a) | Boundary::Right(a) => (a - s.x) / guard(p.x - s.x),
            Boundary::Top(a) | Boundary::Bottom(a) => (a - s.y) / guard(p.y - s.y),
        };
        s.lerp(p, t.clamp(0.0, 1.0))
    }
}

/// Clip against one boundary, writing the surviving loop into `output`.
fn clip_against(input: &[ClipVertex], boundary: Boundary, output: &mut Vec<ClipVertex>) {
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    let mut prev = last;
    let mut prev_inside = boundary.inside(&prev);

    for &curr in input {
        let curr_inside = boundary.inside(&curr);
        match (prev_inside, curr_inside) {
            (true, true) => output.push(curr),
            (false, true) => {
                output.push(boundary.intersect(&prev, &curr));
                output.push(curr);
            }
            (true, false) => output.push(boundary.intersect(&prev, &curr)),
            (false, false) => {}
        }
        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Clip `polygon` against `rect`, processing left, right, top, bottom in
/// sequence. Returns an empty polygon (same material) if nothing survives or
/// the input has fewer than three vertices.
pub fn clip_polygon<'a>(polygon: &Polygon<'a>, rect: ClipRect) -> Polygon<'a> {
    let mut out = Polygon::new(polygon.material);
    if !polygon.is_fillable() {
        return out;
    }

    let mut current: Vec<ClipVertex> = polygon.vertices.iter().map(ClipVertex::from_vertex).collect();
    let mut scratch = Vec::with_capacity(current.len() + 4);

    let boundaries = [
        Boundary::Left(rect.xmin as f32),
        Boundary::Right(rect.xmax as f32),
        Boundary::Top(rect.ymin as f32),
        Boundary::Bottom(rect.ymax as f32),
    ];

    for boundary in boundaries {
        clip_against(&current, boundary, &mut scratch);
        std::mem::swap(&mut current, &mut scratch);
        if current.is_empty() {
            count_call!(FUNCTION_COUNTERS.polygons_clipped_away);
            return out;
        }
    }

    out.vertices = current.into_iter().map(ClipVertex::to_vertex).collect();
    out
}

/// Clip against the full `width` x `height` screen.
#[inline]
pub fn clip_polygon_to_screen<'a>(polygon: &Polygon<'a>, width: i32, height: i32) -> Polygon<'a> {
    clip_polygon(polygon, ClipRect::screen(width, height))
}
