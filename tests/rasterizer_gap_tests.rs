// Coverage tests for the scanline filler
//
// Polygons that share edges must tile the plane: no pixel left between them
// and no pixel claimed by both.

use glam::Vec3;
use scanline_renderer::meshing::shapes;
use scanline_renderer::rendering::{Polygon, ScanlineFiller, ShadingContext, Vertex2D};
use scanline_renderer::{Camera, Color, Framebuffer, Material, Rasterizer, Shader};

const BACKGROUND: Color = Color::BLACK;

fn blank(width: usize, height: usize) -> Framebuffer {
    let mut framebuffer = Framebuffer::new(width, height);
    framebuffer.clear(BACKGROUND);
    framebuffer.clear_depth(1000.0);
    framebuffer
}

fn fill(filler: &mut ScanlineFiller, material: &Material, points: &[(i32, i32)], z: f32, fb: &mut Framebuffer) -> usize {
    let vertices = points.iter().map(|&(x, y)| Vertex2D::new(x, y, z)).collect();
    let polygon = Polygon::with_vertices(material, vertices);
    filler.fill(&polygon, &Shader::default(), &ShadingContext::default(), fb)
}

#[test]
fn triangle_fan_tiles_its_rectangle() {
    let mut filler = ScanlineFiller::new();

    let mut whole = blank(64, 64);
    let solid = Material::default();
    let expected = fill(&mut filler, &solid, &[(10, 10), (50, 10), (50, 40), (10, 40)], 5.0, &mut whole);
    assert_eq!(expected, 40 * 30);

    // Each triangle is nearer than the last, so a pixel covered twice
    // would be counted twice.
    let center = (30, 25);
    let fan = [
        [(10, 10), (50, 10), center],
        [(50, 10), (50, 40), center],
        [(50, 40), (10, 40), center],
        [(10, 40), (10, 10), center],
    ];
    let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];

    let mut split = blank(64, 64);
    let mut written = 0;
    for (k, (triangle, color)) in fan.iter().zip(colors).enumerate() {
        let material = Material::default().with_color(color);
        written += fill(&mut filler, &material, triangle, 10.0 - k as f32, &mut split);
    }

    assert_eq!(written, expected, "overlap between neighbouring triangles");
    assert_eq!(split.count_not(BACKGROUND), expected, "gap between neighbouring triangles");
    for y in 0..64 {
        for x in 0..64 {
            let covered = whole.color_at(x, y) != Some(BACKGROUND);
            assert_eq!(split.color_at(x, y) != Some(BACKGROUND), covered, "pixel ({x},{y})");
        }
    }
}

#[test]
fn slanted_neighbours_share_their_edge_exactly() {
    let mut filler = ScanlineFiller::new();
    let material = Material::default();
    let mut fb = blank(80, 80);

    // Shared edge from (37, 3) to (21, 71) has a non-integer x on most rows.
    let left = fill(&mut filler, &material, &[(5, 3), (37, 3), (21, 71), (2, 71)], 9.0, &mut fb);
    let right = fill(&mut filler, &material, &[(37, 3), (70, 3), (75, 71), (21, 71)], 8.0, &mut fb);

    assert_eq!(left + right, fb.count_not(BACKGROUND));
    for y in 3..71 {
        let row: Vec<bool> = (0..80).map(|x| fb.color_at(x, y) != Some(BACKGROUND)).collect();
        let first = row.iter().position(|&c| c).unwrap();
        let last = row.iter().rposition(|&c| c).unwrap();
        assert!(row[first..=last].iter().all(|&c| c), "gap on row {y}");
    }
}

#[test]
fn sphere_silhouette_has_no_cracks() {
    let camera = Camera::default();
    let mesh = shapes::build_sphere(Material::default(), 16, 32);
    let mut fb = blank(160, 120);
    let mut rasterizer = Rasterizer::default();
    rasterizer.set_eye(Vec3::new(0.0, 0.0, 5.0));
    rasterizer.render_mesh(&mesh, &camera, &mut fb);

    let mut rows = 0;
    for y in 0..120 {
        let row: Vec<bool> = (0..160).map(|x| fb.color_at(x, y) != Some(BACKGROUND)).collect();
        let Some(first) = row.iter().position(|&c| c) else {
            continue;
        };
        let last = row.iter().rposition(|&c| c).unwrap();
        assert!(row[first..=last].iter().all(|&c| c), "crack on row {y}");
        rows += 1;
    }
    assert!(rows > 20, "sphere should span many rows, got {rows}");
}
