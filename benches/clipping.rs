/// Benchmarks for polygon and line clipping
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scanline_renderer::rendering::{clip_line, clip_polygon, ClipRect, Line2D, Polygon, Vertex2D};
use scanline_renderer::{Color, Material};

const RECT: ClipRect = ClipRect::screen(1280, 720);

fn random_vertex(rng: &mut ChaCha8Rng) -> Vertex2D {
    Vertex2D::new(rng.gen_range(-640..1920), rng.gen_range(-360..1080), rng.gen_range(1.0..100.0))
}

fn bench_clip_polygon(c: &mut Criterion) {
    let material = Material::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let polygons: Vec<Polygon<'_>> = (0..256)
        .map(|_| Polygon::with_vertices(&material, (0..6).map(|_| random_vertex(&mut rng)).collect()))
        .collect();

    c.bench_function("clip_polygon_256", |b| {
        b.iter(|| {
            polygons
                .iter()
                .map(|p| clip_polygon(black_box(p), RECT).len())
                .sum::<usize>()
        });
    });

    let inside = Polygon::with_vertices(
        &material,
        vec![
            Vertex2D::new(100, 100, 1.0),
            Vertex2D::new(600, 120, 1.0),
            Vertex2D::new(500, 600, 1.0),
            Vertex2D::new(80, 500, 1.0),
        ],
    );
    c.bench_function("clip_polygon_inside", |b| {
        b.iter(|| clip_polygon(black_box(&inside), RECT));
    });
}

fn bench_clip_line(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let lines: Vec<Line2D> = (0..256)
        .map(|_| {
            let a = random_vertex(&mut rng);
            let b = random_vertex(&mut rng);
            Line2D::new((a.x, a.y, a.z), (b.x, b.y, b.z), Color::WHITE, 1)
        })
        .collect();

    c.bench_function("clip_line_256", |b| {
        b.iter(|| {
            lines
                .iter()
                .filter(|&&line| {
                    let mut line = line;
                    clip_line(black_box(&mut line), RECT)
                })
                .count()
        });
    });
}

criterion_group!(benches, bench_clip_polygon, bench_clip_line);
criterion_main!(benches);
