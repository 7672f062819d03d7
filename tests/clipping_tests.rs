//! Randomized tests for the polygon and line clippers.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scanline_renderer::rendering::{clip_line, clip_polygon, ClipRect, Line2D, Polygon, Vertex2D};
use scanline_renderer::{Color, Material};

const RECT: ClipRect = ClipRect::new(0, 0, 127, 95);
const ITERATIONS: usize = 2000;

fn random_vertex(rng: &mut ChaCha8Rng) -> Vertex2D {
    Vertex2D::new(
        rng.gen_range(-200..330),
        rng.gen_range(-200..300),
        rng.gen_range(1.0..50.0),
    )
}

fn random_polygon<'a>(rng: &mut ChaCha8Rng, material: &'a Material) -> Polygon<'a> {
    let count = rng.gen_range(3..8);
    Polygon::with_vertices(material, (0..count).map(|_| random_vertex(rng)).collect())
}

fn same_positions(a: &Polygon<'_>, b: &Polygon<'_>) -> bool {
    a.len() == b.len()
        && a.vertices
            .iter()
            .zip(&b.vertices)
            .all(|(u, v)| u.x == v.x && u.y == v.y && u.z == v.z)
}

#[test]
fn clipped_polygons_stay_inside_rect() {
    let material = Material::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for i in 0..ITERATIONS {
        let polygon = random_polygon(&mut rng, &material);
        let clipped = clip_polygon(&polygon, RECT);
        for v in &clipped.vertices {
            assert!(
                RECT.contains(v.x, v.y),
                "iteration {i}: vertex ({}, {}) escaped {:?}",
                v.x,
                v.y,
                RECT
            );
            assert!(v.z >= 1.0 - 1e-3 && v.z <= 50.0 + 1e-3, "iteration {i}: depth {}", v.z);
        }
    }
}

#[test]
fn clipping_twice_changes_nothing() {
    let material = Material::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for i in 0..ITERATIONS {
        let polygon = random_polygon(&mut rng, &material);
        let once = clip_polygon(&polygon, RECT);
        if !once.is_fillable() {
            continue;
        }
        let twice = clip_polygon(&once, RECT);
        assert!(same_positions(&once, &twice), "iteration {i}: {:?} vs {:?}", once.vertices, twice.vertices);
    }
}

#[test]
fn polygon_inside_a_larger_rect_is_untouched() {
    let material = Material::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let outer = ClipRect::new(-500, -500, 500, 500);

    for _ in 0..ITERATIONS {
        let polygon = random_polygon(&mut rng, &material);
        let clipped = clip_polygon(&polygon, outer);
        assert!(same_positions(&polygon, &clipped));
    }
}

#[test]
fn clipped_lines_stay_inside_rect() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut accepted = 0;

    for i in 0..ITERATIONS {
        let a = random_vertex(&mut rng);
        let b = random_vertex(&mut rng);
        let original = Line2D::new((a.x, a.y, a.z), (b.x, b.y, b.z), Color::WHITE, 1);
        let mut line = original;

        if !clip_line(&mut line, RECT) {
            assert_eq!(line, original, "iteration {i}: rejected line was modified");
            continue;
        }
        accepted += 1;

        assert!(RECT.contains(line.x1, line.y1), "iteration {i}: {line:?}");
        assert!(RECT.contains(line.x2, line.y2), "iteration {i}: {line:?}");
        let (lo, hi) = (a.z.min(b.z) - 1e-3, a.z.max(b.z) + 1e-3);
        assert!((lo..=hi).contains(&line.z1) && (lo..=hi).contains(&line.z2), "iteration {i}: {line:?}");

        if RECT.contains(a.x, a.y) && RECT.contains(b.x, b.y) {
            assert_eq!(line, original, "iteration {i}: visible line was modified");
        }
    }

    assert!(accepted > 0, "the fuzz ranges should produce some visible lines");
}
