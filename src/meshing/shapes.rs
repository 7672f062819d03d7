/// Procedural solids (cube, pyramid, cylinder, sphere) and the affine
/// editing operations applied to them.
use super::mesh::{Face, Material, Polyhedron, Vertex3D};
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// A solid in the scene. Owns its mesh and mutates it in place.
#[derive(Clone, Debug)]
pub struct Shape {
    pub mesh: Polyhedron,
}

impl Shape {
    pub fn new(mesh: Polyhedron) -> Self {
        Self { mesh }
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.apply_matrix(&Mat4::from_translation(delta));
    }

    pub fn scale(&mut self, factor: f32) {
        self.apply_matrix(&Mat4::from_scale(Vec3::splat(factor)));
    }

    pub fn scale_xyz(&mut self, factors: Vec3) {
        self.apply_matrix(&Mat4::from_scale(factors));
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.apply_matrix(&Mat4::from_rotation_x(degrees.to_radians()));
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.apply_matrix(&Mat4::from_rotation_y(degrees.to_radians()));
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.apply_matrix(&Mat4::from_rotation_z(degrees.to_radians()));
    }

    fn apply_matrix(&mut self, matrix: &Mat4) {
        self.mesh.transform(matrix);
    }
}

/// Unit cube spanning [-1, 1]^3 with vertex normals averaged from the
/// three adjacent faces.
pub fn build_cube(material: Material) -> Polyhedron {
    let positions = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];

    // Corners sit on the diagonal, so the averaged face normal is the
    // normalized position.
    let vertices = positions
        .iter()
        .map(|&p| Vertex3D::new(p, p.normalize()))
        .collect();

    let faces = vec![
        Face::new(vec![0, 1, 2, 3]), // z = -1
        Face::new(vec![5, 4, 7, 6]), // z = +1
        Face::new(vec![4, 0, 3, 7]), // x = -1
        Face::new(vec![1, 5, 6, 2]), // x = +1
        Face::new(vec![4, 5, 1, 0]), // y = -1
        Face::new(vec![3, 2, 6, 7]), // y = +1
    ];

    Polyhedron::new(vertices, faces, material)
}

/// Square-based pyramid: base at y = -1, apex at y = +1.
pub fn build_pyramid(material: Material) -> Polyhedron {
    let positions = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let vertices = positions
        .iter()
        .map(|&p| Vertex3D::new(p, p.normalize()))
        .collect();

    let faces = vec![
        Face::new(vec![0, 1, 2, 3]),
        Face::new(vec![0, 1, 4]),
        Face::new(vec![1, 2, 4]),
        Face::new(vec![2, 3, 4]),
        Face::new(vec![3, 0, 4]),
    ];

    Polyhedron::new(vertices, faces, material)
}

/// Open cylinder of radius 1 between y = -1 and y = +1 (side quads only).
pub fn build_cylinder(material: Material, slices: usize) -> Polyhedron {
    let slices = slices.max(3);
    let step = 2.0 * PI / slices as f32;

    let mut vertices = Vec::with_capacity(slices * 2);
    for i in 0..slices {
        let a = i as f32 * step;
        let (z, x) = a.sin_cos();
        let normal = Vec3::new(x, 0.0, z).normalize();
        vertices.push(Vertex3D::new(Vec3::new(x, 1.0, z), normal));
        vertices.push(Vertex3D::new(Vec3::new(x, -1.0, z), normal));
    }

    let faces = (0..slices)
        .map(|i| {
            let next = (i + 1) % slices;
            Face::new(vec![i * 2, next * 2, next * 2 + 1, i * 2 + 1])
        })
        .collect();

    Polyhedron::new(vertices, faces, material)
}

/// UV sphere of radius 1 built from `stacks` x `slices` quads.
pub fn build_sphere(material: Material, stacks: usize, slices: usize) -> Polyhedron {
    let stacks = stacks.max(2);
    let slices = slices.max(3);

    let mut vertices = Vec::with_capacity((stacks + 1) * (slices + 1));
    for i in 0..=stacks {
        let phi = i as f32 / stacks as f32 * PI;
        for j in 0..=slices {
            let theta = j as f32 / slices as f32 * 2.0 * PI;
            let p = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            vertices.push(Vertex3D::new(p, p.normalize_or_zero()));
        }
    }

    let row = slices + 1;
    let mut faces = Vec::with_capacity(stacks * slices);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            faces.push(Face::new(vec![a, b, b + 1, a + 1]));
        }
    }

    Polyhedron::new(vertices, faces, material)
}

/// Collection of solids placed in the scene.
#[derive(Clone, Debug, Default)]
pub struct Shapes {
    pub objects: Vec<Shape>,
}

impl Shapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn push(&mut self, mesh: Polyhedron) -> &mut Shape {
        self.objects.push(Shape::new(mesh));
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    /// Cube with edge length `size` centered at `center`.
    pub fn create_cube(&mut self, material: Material, center: Vec3, size: f32) -> &mut Shape {
        let shape = self.push(build_cube(material));
        shape.scale(size * 0.5);
        shape.translate(center);
        shape
    }

    pub fn create_pyramid(
        &mut self,
        material: Material,
        center: Vec3,
        size: f32,
        height: f32,
    ) -> &mut Shape {
        let shape = self.push(build_pyramid(material));
        shape.scale_xyz(Vec3::new(size * 0.5, height * 0.5, size * 0.5));
        shape.translate(center);
        shape
    }

    pub fn create_cylinder(
        &mut self,
        material: Material,
        center: Vec3,
        radius: f32,
        height: f32,
        slices: usize,
    ) -> &mut Shape {
        let shape = self.push(build_cylinder(material, slices));
        shape.scale_xyz(Vec3::new(radius, height * 0.5, radius));
        shape.translate(center);
        shape
    }

    pub fn create_sphere(
        &mut self,
        material: Material,
        center: Vec3,
        radius: f32,
        stacks: usize,
        slices: usize,
    ) -> &mut Shape {
        let shape = self.push(build_sphere(material, stacks, slices));
        shape.scale(radius);
        shape.translate(center);
        shape
    }
}
