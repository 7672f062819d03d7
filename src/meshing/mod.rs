/// Mesh data and the procedural and interactive ways of building it
pub mod extrusion;
pub mod mesh;
pub mod shapes;

pub use extrusion::{
    create_extruded_polyhedron, intersect_draw_plane, screen_to_world_ray, DrawPlane, EditMode,
    ExtrusionState, Ray,
};
pub use mesh::{Color, Face, Material, MeshError, Polyhedron, Vertex3D};
pub use shapes::{Shape, Shapes};
