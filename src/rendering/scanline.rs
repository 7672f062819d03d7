/// Edge-table / active-edge-table polygon filler.
///
/// Edge x positions are tracked as exact fractions so that stepping down
/// long steep or shallow edges never accumulates rounding drift. Depth,
/// intensity, normal and world position are linear in y along each edge and
/// linear in x along each span.
use super::framebuffer::Framebuffer;
use super::primitives::{Polygon, Vertex2D};
use super::shading::{Shader, ShadingContext};
use crate::meshing::Material;
use crate::perf::FUNCTION_COUNTERS;
use crate::{count_add, count_call};
use glam::Vec3;
use std::cmp::Ordering;

/// Exact rational `top / bottom` with `bottom > 0`.
#[derive(Copy, Clone, Debug)]
pub struct Frac {
    pub top: i64,
    pub bottom: i64,
}

impl Frac {
    #[inline]
    pub fn new(top: i64, bottom: i64) -> Self {
        debug_assert!(bottom != 0, "fraction with zero denominator");
        if bottom < 0 {
            Self {
                top: -top,
                bottom: -bottom,
            }
        } else {
            Self { top, bottom }
        }
    }

    #[inline]
    pub fn floor(self) -> i64 {
        self.top.div_euclid(self.bottom)
    }

    #[inline]
    pub fn ceil(self) -> i64 {
        -(-self.top).div_euclid(self.bottom)
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        (self.top as f64 / self.bottom as f64) as f32
    }
}

impl std::ops::Add for Frac {
    type Output = Frac;

    #[inline]
    fn add(self, rhs: Frac) -> Frac {
        if self.bottom == rhs.bottom {
            Frac {
                top: self.top + rhs.top,
                bottom: self.bottom,
            }
        } else {
            Frac {
                top: self.top * rhs.bottom + rhs.top * self.bottom,
                bottom: self.bottom * rhs.bottom,
            }
        }
    }
}

impl PartialEq for Frac {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frac {}

impl PartialOrd for Frac {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frac {
    /// Cross-multiplied comparison; both denominators are positive.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.top * other.bottom).cmp(&(other.top * self.bottom))
    }
}

/// Interpolated quantities carried along edges and spans.
#[derive(Copy, Clone, Debug, Default)]
struct Attribs {
    z: f32,
    intensity: f32,
    normal: Vec3,
    world: Vec3,
}

impl Attribs {
    #[inline]
    fn of(v: &Vertex2D) -> Self {
        Self {
            z: v.z,
            intensity: v.intensity,
            normal: v.normal,
            world: v.world,
        }
    }

    /// Per-unit increment to go from `self` to `other` in `steps` units.
    #[inline]
    fn step_to(&self, other: &Self, steps: f32) -> Self {
        let inv = 1.0 / steps;
        Self {
            z: (other.z - self.z) * inv,
            intensity: (other.intensity - self.intensity) * inv,
            normal: (other.normal - self.normal) * inv,
            world: (other.world - self.world) * inv,
        }
    }

    #[inline]
    fn add_scaled(&self, d: &Self, k: f32) -> Self {
        Self {
            z: self.z + d.z * k,
            intensity: self.intensity + d.intensity * k,
            normal: self.normal + d.normal * k,
            world: self.world + d.world * k,
        }
    }
}

/// Edge record in the edge table.
#[derive(Copy, Clone, Debug)]
struct Edge {
    /// Scanline at which the edge stops being active.
    ymax: i32,
    /// x at the current scanline.
    x: Frac,
    /// x increment per scanline (inverse slope).
    dx: Frac,
    attribs: Attribs,
    dattribs: Attribs,
}

impl Edge {
    /// Build an edge between two vertices, or None for a horizontal one.
    fn between(a: &Vertex2D, b: &Vertex2D) -> Option<(i32, Edge)> {
        if a.y == b.y {
            return None;
        }
        let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };
        let dy = (hi.y - lo.y) as i64;

        let start = Attribs::of(lo);
        let edge = Edge {
            ymax: hi.y,
            // Share the denominator with dx so advancing is a plain add.
            x: Frac::new(lo.x as i64 * dy, dy),
            dx: Frac::new((hi.x - lo.x) as i64, dy),
            attribs: start,
            dattribs: start.step_to(&Attribs::of(hi), dy as f32),
        };
        Some((lo.y, edge))
    }

    #[inline]
    fn advance(&mut self) {
        self.x = self.x + self.dx;
        self.attribs = self.attribs.add_scaled(&self.dattribs, 1.0);
    }
}

/// Scanline polygon filler. Holds scratch tables so repeated fills do not
/// reallocate.
#[derive(Default)]
pub struct ScanlineFiller {
    edge_table: Vec<Vec<Edge>>,
    active: Vec<Edge>,
}

impl ScanlineFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize a clipped screen-space polygon with depth testing.
    /// Returns the number of pixels that passed the depth test.
    pub fn fill(
        &mut self,
        polygon: &Polygon<'_>,
        shader: &Shader,
        ctx: &ShadingContext,
        framebuffer: &mut Framebuffer,
    ) -> usize {
        if !polygon.is_fillable() {
            return 0;
        }
        count_call!(FUNCTION_COUNTERS.polygons_filled);

        let verts = &polygon.vertices;
        let y_start = verts.iter().map(|v| v.y).min().unwrap_or(0);
        let y_end = verts.iter().map(|v| v.y).max().unwrap_or(0);
        if y_start == y_end {
            return 0;
        }

        // 1. Edge table bucketed by lower y.
        let rows = (y_end - y_start) as usize;
        for bucket in &mut self.edge_table {
            bucket.clear();
        }
        if self.edge_table.len() < rows {
            self.edge_table.resize_with(rows, Vec::new);
        }
        self.active.clear();

        for (i, a) in verts.iter().enumerate() {
            let b = &verts[(i + 1) % verts.len()];
            if let Some((y0, edge)) = Edge::between(a, b) {
                self.edge_table[(y0 - y_start) as usize].push(edge);
            }
        }

        let width = framebuffer.width() as i64;
        let height = framebuffer.height() as i32;
        let material = polygon.material;
        let mut written = 0usize;

        for y in y_start..y_end {
            // 2. Move starting edges into the active list, then retire finished ones.
            for edge in self.edge_table[(y - y_start) as usize].drain(..) {
                let at = self.active.partition_point(|e| e.x < edge.x);
                self.active.insert(at, edge);
            }
            self.active.retain(|e| e.ymax != y);

            // 3. Fill spans between parity pairs.
            if (0..height).contains(&y) {
                for pair in self.active.chunks_exact(2) {
                    let (left, right) = (&pair[0], &pair[1]);
                    written += Self::fill_span(
                        y,
                        left,
                        right,
                        width,
                        material,
                        shader,
                        ctx,
                        framebuffer,
                    );
                }
            }

            // 4. Step every active edge to the next scanline and keep x order.
            for edge in &mut self.active {
                edge.advance();
            }
            self.active.sort_by(|a, b| a.x.cmp(&b.x));
        }

        written
    }

    /// Pixels with `left.x <= x < right.x` on scanline `y`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn fill_span(
        y: i32,
        left: &Edge,
        right: &Edge,
        width: i64,
        material: &Material,
        shader: &Shader,
        ctx: &ShadingContext,
        framebuffer: &mut Framebuffer,
    ) -> usize {
        let x_first = left.x.ceil().max(0);
        let x_last = right.x.ceil().min(width);
        if x_first >= x_last {
            return 0;
        }

        let xl = left.x.to_f32();
        let span = right.x.to_f32() - xl;
        let step = if span > 0.0 {
            left.attribs.step_to(&right.attribs, span)
        } else {
            Attribs::default()
        };

        let mut a = left.attribs.add_scaled(&step, x_first as f32 - xl);
        let mut written = 0usize;
        count_add!(FUNCTION_COUNTERS.total_pixels_tested, (x_last - x_first) as u64);

        for x in x_first..x_last {
            let x = x as i32;
            let visible = framebuffer.depth_at(x, y).is_some_and(|d| a.z < d);
            if visible {
                let color = shader.shade_pixel(material, ctx, a.intensity, a.normal, a.world);
                if framebuffer.set(x, y, a.z, color) {
                    written += 1;
                }
            }
            a = a.add_scaled(&step, 1.0);
        }
        written
    }
}
