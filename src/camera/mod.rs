/// Camera system with orbit and FPS navigation
/// Projects world-space geometry to pixel coordinates
use crate::meshing::{Face, Polyhedron};
use crate::perf::FUNCTION_COUNTERS;
use crate::rendering::clipping::clip_polygon_to_screen;
use crate::rendering::primitives::{Line2D, Line3D, Polygon, Vertex2D};
use crate::count_call;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Points whose NDC coordinates fall outside this bound are rejected.
const NDC_MARGIN: f32 = 1.5;

/// Projected lines are cut to this many pixels from the origin so the
/// integer line stages never overflow.
const LINE_COORD_LIMIT: f32 = (1 << 24) as f32;

const MIN_ORBIT_DISTANCE: f32 = 0.1;
const MAX_TILT_DEG: f32 = 89.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Orthographic,
    #[default]
    Perspective,
}

impl ProjectionKind {
    pub fn name(self) -> &'static str {
        match self {
            ProjectionKind::Orthographic => "Orthographic",
            ProjectionKind::Perspective => "Perspective",
        }
    }
}

/// How `add_x`/`add_y` rotate the view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveMode {
    /// Eye circles `look` at the orbit distance.
    #[default]
    Orbit,
    /// Eye stays put and `look` turns around it.
    Fps,
}

impl MoveMode {
    pub fn name(self) -> &'static str {
        match self {
            MoveMode::Orbit => "Orbit",
            MoveMode::Fps => "Fps",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub look: Vec3,
    pub up: Vec3,

    pub projection: ProjectionKind,
    pub move_mode: MoveMode,

    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// World-space height of the orthographic view volume
    pub ortho_height: f32,

    orbit_distance: f32,
    azimuth: f32,
    elevation: f32,
    yaw: f32,
    pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            look: Vec3::ZERO,
            up: Vec3::Y,
            projection: ProjectionKind::Perspective,
            move_mode: MoveMode::Orbit,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
            ortho_height: 10.0,
            orbit_distance: 10.0,
            azimuth: 0.0,
            elevation: 0.0,
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    pub fn new(eye: Vec3, look: Vec3) -> Self {
        Self {
            eye,
            look,
            ..Self::default()
        }
    }

    /// World to camera space. Camera looks down -Z.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look, self.up)
    }

    #[inline]
    fn aspect(width: usize, height: usize) -> f32 {
        if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        }
    }

    /// Perspective focal factor `1 / tan(fov_y / 2)`.
    #[inline]
    fn focal(&self) -> f32 {
        1.0 / (self.fov_y.to_radians() * 0.5).tan()
    }

    /// Camera-space point to NDC. `p.z` must be negative.
    #[inline]
    fn to_ndc(&self, p: Vec3, aspect: f32) -> (f32, f32) {
        match self.projection {
            ProjectionKind::Orthographic => {
                let half_h = self.ortho_height * 0.5;
                let half_w = half_h * aspect;
                (p.x / half_w, p.y / half_h)
            }
            ProjectionKind::Perspective => {
                let k = self.focal() / -p.z;
                (p.x * k / aspect, p.y * k)
            }
        }
    }

    #[inline]
    fn ndc_to_pixel(ndc_x: f32, ndc_y: f32, width: usize, height: usize) -> (f32, f32) {
        (
            (ndc_x * 0.5 + 0.5) * width as f32,
            (1.0 - (ndc_y * 0.5 + 0.5)) * height as f32,
        )
    }

    /// Project a world-space vertex using a precomputed view matrix.
    fn project_with(
        &self,
        view: &Mat4,
        position: Vec3,
        normal: Vec3,
        width: usize,
        height: usize,
    ) -> Option<Vertex2D> {
        let p = view.transform_point3(position);
        if p.z >= -self.near {
            return None;
        }

        let (ndc_x, ndc_y) = self.to_ndc(p, Self::aspect(width, height));
        if !(-NDC_MARGIN..=NDC_MARGIN).contains(&ndc_x) || !(-NDC_MARGIN..=NDC_MARGIN).contains(&ndc_y) {
            return None;
        }

        let (px, py) = Self::ndc_to_pixel(ndc_x, ndc_y, width, height);
        Some(
            Vertex2D::new(px as i32, py as i32, -p.z)
                .with_normal(normal)
                .with_world(position),
        )
    }

    /// Project one world-space vertex to pixel space.
    ///
    /// Returns None when the point lies behind the near plane or more than
    /// half a screen outside the view.
    pub fn project_vertex(&self, position: Vec3, normal: Vec3, width: usize, height: usize) -> Option<Vertex2D> {
        self.project_with(&self.view_matrix(), position, normal, width, height)
    }

    /// Project every vertex of `face`. If any vertex is rejected the whole
    /// face is dropped and the returned polygon is empty.
    pub fn project_face<'a>(&self, mesh: &'a Polyhedron, face: &Face, width: usize, height: usize) -> Polygon<'a> {
        count_call!(FUNCTION_COUNTERS.faces_submitted);
        let view = self.view_matrix();
        let mut polygon = Polygon::new(&mesh.material);
        polygon.vertices.reserve(face.len());

        for &index in &face.indices {
            let projected = mesh
                .vertices
                .get(index)
                .and_then(|v| self.project_with(&view, v.position, v.normal, width, height));
            match projected {
                Some(v) => polygon.vertices.push(v),
                None => {
                    count_call!(FUNCTION_COUNTERS.faces_rejected);
                    polygon.vertices.clear();
                    return polygon;
                }
            }
        }
        polygon
    }

    /// `project_face` followed by clipping against the `width` x `height` screen.
    pub fn project_and_clip<'a>(&self, mesh: &'a Polyhedron, face: &Face, width: usize, height: usize) -> Polygon<'a> {
        let polygon = self.project_face(mesh, face, width, height);
        if !polygon.is_fillable() {
            return Polygon::new(&mesh.material);
        }
        clip_polygon_to_screen(&polygon, width as i32, height as i32)
    }

    /// Project a world-space segment, clipping it to the near and far planes
    /// first. The result still needs clipping to the screen.
    pub fn project_line(&self, line: &Line3D, width: usize, height: usize) -> Option<Line2D> {
        count_call!(FUNCTION_COUNTERS.lines_submitted);
        let view = self.view_matrix();
        let a = view.transform_point3(line.p1);
        let b = view.transform_point3(line.p2);

        let Some((a, b)) = clip_segment_z(a, b, self.near, self.far) else {
            count_call!(FUNCTION_COUNTERS.lines_rejected);
            return None;
        };

        let aspect = Self::aspect(width, height);
        let project = |p: Vec3| -> Option<(f32, f32, f32)> {
            if p.z >= -self.near {
                return None;
            }
            let (ndc_x, ndc_y) = self.to_ndc(p, aspect);
            let (px, py) = Self::ndc_to_pixel(ndc_x, ndc_y, width, height);
            Some((px, py, -p.z))
        };

        let limited = match (project(a), project(b)) {
            (Some(start), Some(end)) => limit_segment(start, end),
            _ => None,
        };
        let Some((start, end)) = limited else {
            count_call!(FUNCTION_COUNTERS.lines_rejected);
            return None;
        };
        let to_pixel = |(x, y, z): (f32, f32, f32)| (x as i32, y as i32, z);
        Some(Line2D::new(to_pixel(start), to_pixel(end), line.color, line.width))
    }

    /// World-space ray through pixel `(x, y)`, as `(origin, unit direction)`.
    ///
    /// Perspective rays start at the eye. Orthographic rays start on the
    /// camera plane and all share the view direction.
    pub fn screen_ray(&self, x: f32, y: f32, width: usize, height: usize) -> (Vec3, Vec3) {
        let aspect = Self::aspect(width, height);
        let ndc_x = x / width.max(1) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - y / height.max(1) as f32 * 2.0;
        let inverse_view = self.view_matrix().inverse();

        match self.projection {
            ProjectionKind::Perspective => {
                let f = self.focal();
                let dir_cam = Vec3::new(ndc_x * aspect / f, ndc_y / f, -1.0);
                let dir = inverse_view.transform_vector3(dir_cam).normalize_or_zero();
                (self.eye, dir)
            }
            ProjectionKind::Orthographic => {
                let half_h = self.ortho_height * 0.5;
                let origin_cam = Vec3::new(ndc_x * half_h * aspect, ndc_y * half_h, 0.0);
                let origin = inverse_view.transform_point3(origin_cam);
                let dir = inverse_view.transform_vector3(Vec3::NEG_Z).normalize_or_zero();
                (origin, dir)
            }
        }
    }

    /// Orthonormal `(forward, right, up)` for the current eye/look/up.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.look - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (forward, right, up)
    }

    pub fn orbit_distance(&self) -> f32 {
        self.orbit_distance
    }

    /// `(azimuth, elevation)` in degrees.
    pub fn orbit_angles(&self) -> (f32, f32) {
        (self.azimuth, self.elevation)
    }

    /// `(yaw, pitch)` in degrees.
    pub fn fps_angles(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// Horizontal rotation: azimuth in orbit mode, yaw in FPS mode.
    pub fn add_x(&mut self, delta_deg: f32) {
        match self.move_mode {
            MoveMode::Orbit => {
                self.azimuth = wrap_degrees(self.azimuth + delta_deg);
                self.update_from_orbit_angles();
            }
            MoveMode::Fps => {
                self.yaw = wrap_degrees(self.yaw + delta_deg);
                self.update_from_fps_angles();
            }
        }
    }

    /// Vertical rotation: elevation in orbit mode, pitch in FPS mode.
    pub fn add_y(&mut self, delta_deg: f32) {
        match self.move_mode {
            MoveMode::Orbit => {
                self.elevation = (self.elevation + delta_deg).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
                self.update_from_orbit_angles();
            }
            MoveMode::Fps => {
                self.pitch = (self.pitch + delta_deg).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
                self.update_from_fps_angles();
            }
        }
    }

    pub fn add_orbit_distance(&mut self, delta: f32) {
        self.orbit_distance = (self.orbit_distance + delta).max(MIN_ORBIT_DISTANCE);
        self.update_from_orbit_angles();
    }

    /// Strafe along the camera's right axis.
    pub fn move_x(&mut self, delta: f32) {
        let (_, right, _) = self.basis();
        self.translate(right * delta);
    }

    /// Move along the camera's up axis.
    pub fn move_y(&mut self, delta: f32) {
        let (_, _, up) = self.basis();
        self.translate(up * delta);
    }

    /// Move along the viewing direction.
    pub fn move_z(&mut self, delta: f32) {
        let (forward, _, _) = self.basis();
        self.translate(forward * delta);
    }

    #[inline]
    fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.look += offset;
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            ProjectionKind::Orthographic => ProjectionKind::Perspective,
            ProjectionKind::Perspective => ProjectionKind::Orthographic,
        };
        log::debug!("projection: {}", self.projection.name());
    }

    /// Put the eye back on +Z looking at the origin.
    pub fn reset_pose(&mut self, distance: f32) {
        self.eye = Vec3::new(0.0, 0.0, distance);
        self.look = Vec3::ZERO;
        self.up = Vec3::Y;
    }

    fn update_from_orbit_angles(&mut self) {
        let az = self.azimuth.to_radians();
        let el = self.elevation.to_radians();
        let r = if self.orbit_distance > 0.0 {
            self.orbit_distance
        } else {
            (self.eye - self.look).length()
        };

        let offset = Vec3::new(r * el.cos() * az.cos(), r * el.sin(), r * el.cos() * az.sin());
        self.eye = self.look + offset;
        self.up = level_up(self.look - self.eye);
    }

    fn update_from_fps_angles(&mut self) {
        let y = self.yaw.to_radians();
        let p = self.pitch.to_radians();
        let forward = Vec3::new(p.cos() * y.cos(), p.sin(), p.cos() * y.sin()).normalize_or_zero();
        self.look = self.eye + forward;
        self.up = level_up(forward);
    }
}

/// Up vector orthogonal to `forward` with no roll relative to world +Y.
fn level_up(forward: Vec3) -> Vec3 {
    let forward = forward.normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    let up = right.cross(forward).normalize_or_zero();
    if up == Vec3::ZERO {
        Vec3::Y
    } else {
        up
    }
}

fn wrap_degrees(mut angle: f32) -> f32 {
    if angle > 180.0 {
        angle -= 360.0;
    }
    if angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Shorten a projected segment `(x, y, depth)` so both ends lie within
/// `LINE_COORD_LIMIT` on each axis. The direction is unchanged and depth is
/// interpolated along it. `None` if no part of the segment is in range.
fn limit_segment(a: (f32, f32, f32), b: (f32, f32, f32)) -> Option<((f32, f32, f32), (f32, f32, f32))> {
    let (dx, dy, dz) = (b.0 - a.0, b.1 - a.1, b.2 - a.2);
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    let bounds = [
        (-dx, a.0 + LINE_COORD_LIMIT),
        (dx, LINE_COORD_LIMIT - a.0),
        (-dy, a.1 + LINE_COORD_LIMIT),
        (dy, LINE_COORD_LIMIT - a.1),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f32| (a.0 + dx * t, a.1 + dy * t, a.2 + dz * t);
    let start = if t0 > 0.0 { at(t0) } else { a };
    let end = if t1 < 1.0 { at(t1) } else { b };
    Some((start, end))
}

/// Clip a camera-space segment to `-far <= z <= -near`.
///
/// Returns None when the segment lies entirely outside either plane.
/// Endpoints moved onto a plane are snapped exactly to it.
pub fn clip_segment_z(mut a: Vec3, mut b: Vec3, near: f32, far: f32) -> Option<(Vec3, Vec3)> {
    let z_near = -near;
    let z_far = -far;
    let at_z = |a: Vec3, b: Vec3, z: f32| -> Vec3 {
        let t = (z - a.z) / (b.z - a.z);
        let mut p = a + (b - a) * t;
        p.z = z;
        p
    };

    if a.z > z_near && b.z > z_near {
        return None;
    }
    if a.z > z_near {
        a = at_z(a, b, z_near);
    } else if b.z > z_near {
        b = at_z(a, b, z_near);
    }

    if a.z < z_far && b.z < z_far {
        return None;
    }
    if a.z < z_far {
        a = at_z(a, b, z_far);
    } else if b.z < z_far {
        b = at_z(a, b, z_far);
    }

    Some((a, b))
}

/// Camera controller - handles held-key movement state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CameraController {
    pub forward_pressed: bool,
    pub backward_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_moving(&self) -> bool {
        self.forward_pressed
            || self.backward_pressed
            || self.left_pressed
            || self.right_pressed
            || self.up_pressed
            || self.down_pressed
    }

    /// Move the camera `step` world units along each held axis.
    pub fn update_camera(&self, camera: &mut Camera, step: f32) {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;

        let forward = axis(self.forward_pressed, self.backward_pressed);
        let right = axis(self.right_pressed, self.left_pressed);
        let up = axis(self.up_pressed, self.down_pressed);

        if forward != 0.0 {
            camera.move_z(forward * step);
        }
        if right != 0.0 {
            camera.move_x(right * step);
        }
        if up != 0.0 {
            camera.move_y(up * step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meshing::{Color, Material, Vertex3D};
    use approx::assert_relative_eq;

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::default();
        let v = camera.project_vertex(Vec3::ZERO, Vec3::Z, 800, 600).unwrap();
        assert_eq!((v.x, v.y), (400, 300));
        assert_relative_eq!(v.z, 5.0, epsilon = 1e-5);
        assert_eq!(v.world, Vec3::ZERO);
        assert_eq!(v.intensity, 1.0);
    }

    #[test]
    fn points_behind_or_at_near_plane_are_rejected() {
        let camera = Camera::default();
        assert!(camera.project_vertex(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, 100, 100).is_none());
        assert!(camera.project_vertex(Vec3::new(0.0, 0.0, 4.95), Vec3::Z, 100, 100).is_none());
    }

    #[test]
    fn points_far_off_screen_are_rejected() {
        let camera = Camera::default();
        assert!(camera.project_vertex(Vec3::new(100.0, 0.0, 0.0), Vec3::Z, 100, 100).is_none());
        assert!(camera.project_vertex(Vec3::new(0.0, -100.0, 0.0), Vec3::Z, 100, 100).is_none());
    }

    #[test]
    fn up_is_up_on_screen() {
        let camera = Camera::default();
        let above = camera.project_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 100, 100).unwrap();
        let right = camera.project_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, 100, 100).unwrap();
        assert!(above.y < 50);
        assert!(right.x > 50);
    }

    #[test]
    fn orthographic_projection_ignores_depth() {
        let camera = Camera {
            projection: ProjectionKind::Orthographic,
            ..Camera::default()
        };
        let near = camera.project_vertex(Vec3::new(2.5, 0.0, 0.0), Vec3::Z, 100, 100).unwrap();
        let far = camera.project_vertex(Vec3::new(2.5, 0.0, -20.0), Vec3::Z, 100, 100).unwrap();
        assert_eq!(near.x, 75);
        assert_eq!(far.x, 75);
        assert!(far.z > near.z);
    }

    #[test]
    fn face_with_one_rejected_vertex_is_dropped() {
        let mesh = Polyhedron::new(
            vec![
                Vertex3D::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::Z),
                Vertex3D::new(Vec3::new(1.0, -1.0, 0.0), Vec3::Z),
                Vertex3D::new(Vec3::new(0.0, 1.0, 10.0), Vec3::Z),
            ],
            vec![Face::new([0, 1, 2])],
            Material::default(),
        );
        let camera = Camera::default();
        assert!(camera.project_face(&mesh, &mesh.faces[0], 100, 100).is_empty());
        assert!(camera.project_and_clip(&mesh, &mesh.faces[0], 100, 100).is_empty());
    }

    #[test]
    fn line_crossing_near_plane_is_rejected() {
        let camera = Camera::default();
        let through_eye = Line3D::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), Color::BLUE, 1);
        assert!(camera.project_line(&through_eye, 100, 100).is_none());
        let beside_eye = Line3D::new(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 10.0), Color::BLUE, 1);
        assert!(camera.project_line(&beside_eye, 100, 100).is_none());
    }

    #[test]
    fn line_in_front_of_camera_keeps_its_depths() {
        let camera = Camera::default();
        let line = Line3D::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 3.0), Color::BLUE, 1);
        let l = camera.project_line(&line, 100, 100).unwrap();
        assert_eq!((l.x1, l.y1), (50, 50));
        assert_relative_eq!(l.z1, 5.0, epsilon = 1e-5);
        assert_relative_eq!(l.z2, 2.0, epsilon = 1e-5);
        assert!(l.y2 < l.y1);
    }

    #[test]
    fn huge_projected_line_keeps_its_slope() {
        let camera = Camera::default();
        // The far end sits just in front of the near plane and projects far off screen.
        let line = Line3D::new(Vec3::ZERO, Vec3::new(1.0e6, 5.0e5, 4.8), Color::GREEN, 1);
        let l = camera.project_line(&line, 100, 100).unwrap();
        assert_eq!((l.x1, l.y1), (50, 50));
        assert!((l.x2 as f32) <= LINE_COORD_LIMIT && l.x2 > 1 << 23);
        let slope = (l.y2 - l.y1) as f64 / (l.x2 - l.x1) as f64;
        assert_relative_eq!(slope, -0.5, epsilon = 1e-4);
        assert!(l.z2 > camera.near && l.z2 < l.z1);
    }

    #[test]
    fn segment_limit_cuts_both_ends() {
        let big = 4.0 * LINE_COORD_LIMIT;
        let (start, end) = limit_segment((-big, -big, 1.0), (big, big, 3.0)).unwrap();
        assert_relative_eq!(start.0, -LINE_COORD_LIMIT);
        assert_relative_eq!(end.1, LINE_COORD_LIMIT);
        assert_relative_eq!(start.2, 1.75, epsilon = 1e-4);
        assert_relative_eq!(end.2, 2.25, epsilon = 1e-4);
        assert!(limit_segment((big, -big, 1.0), (big, big, 1.0)).is_none());
        let inside = ((1.0, 2.0, 3.0), (-4.0, 5.0, 6.0));
        assert_eq!(limit_segment(inside.0, inside.1), Some(inside));
    }

    #[test]
    fn line_entirely_behind_is_rejected() {
        let camera = Camera::default();
        let line = Line3D::new(Vec3::new(0.0, 0.0, 6.0), Vec3::new(1.0, 0.0, 9.0), Color::RED, 1);
        assert!(camera.project_line(&line, 100, 100).is_none());
    }

    #[test]
    fn segment_z_clipping() {
        let (a, b) = clip_segment_z(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -200.0), 0.1, 100.0).unwrap();
        assert_eq!(a.z, -0.1);
        assert_eq!(b.z, -100.0);
        assert!(clip_segment_z(Vec3::new(0.0, 0.0, -150.0), Vec3::new(0.0, 0.0, -120.0), 0.1, 100.0).is_none());
        let inside = (Vec3::new(1.0, 2.0, -3.0), Vec3::new(-1.0, 0.0, -50.0));
        assert_eq!(clip_segment_z(inside.0, inside.1, 0.1, 100.0), Some(inside));
    }

    #[test]
    fn orbit_angles_wrap_and_clamp() {
        let mut camera = Camera::default();
        camera.add_x(170.0);
        camera.add_x(20.0);
        assert_relative_eq!(camera.orbit_angles().0, -170.0);
        camera.add_y(120.0);
        assert_eq!(camera.orbit_angles().1, 89.0);
        assert_relative_eq!((camera.eye - camera.look).length(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn fps_turn_moves_look_not_eye() {
        let mut camera = Camera {
            move_mode: MoveMode::Fps,
            ..Camera::default()
        };
        let eye = camera.eye;
        camera.add_x(90.0);
        assert_eq!(camera.eye, eye);
        assert_relative_eq!((camera.look - camera.eye).length(), 1.0, epsilon = 1e-5);
        camera.add_y(-200.0);
        assert_eq!(camera.fps_angles().1, -89.0);
    }

    #[test]
    fn movement_keeps_facing() {
        let mut camera = Camera::default();
        let before = camera.look - camera.eye;
        camera.move_x(1.5);
        camera.move_y(-0.5);
        camera.move_z(2.0);
        let after = camera.look - camera.eye;
        assert_relative_eq!(before.x, after.x, epsilon = 1e-5);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-5);
        assert_relative_eq!(before.z, after.z, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_distance_has_a_floor() {
        let mut camera = Camera::default();
        camera.add_orbit_distance(-50.0);
        assert_eq!(camera.orbit_distance(), 0.1);
        assert_relative_eq!((camera.eye - camera.look).length(), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn toggle_projection_flips() {
        let mut camera = Camera::default();
        camera.toggle_projection();
        assert_eq!(camera.projection, ProjectionKind::Orthographic);
        camera.toggle_projection();
        assert_eq!(camera.projection, ProjectionKind::Perspective);
    }

    #[test]
    fn screen_ray_passes_through_projected_point() {
        for projection in [ProjectionKind::Perspective, ProjectionKind::Orthographic] {
            let camera = Camera {
                projection,
                ..Camera::new(Vec3::new(3.0, 2.0, 6.0), Vec3::ZERO)
            };
            let target = Vec3::new(0.5, 0.75, -0.25);
            let v = camera.project_vertex(target, Vec3::Z, 640, 480).unwrap();
            let (origin, dir) = camera.screen_ray(v.x as f32 + 0.5, v.y as f32 + 0.5, 640, 480);
            let to_target = target - origin;
            let miss = (to_target - dir * to_target.dot(dir)).length();
            assert!(miss < 0.05, "{projection:?} ray misses by {miss}");
        }
    }

    #[test]
    fn controller_moves_along_held_axes() {
        let mut camera = Camera::default();
        let controller = CameraController {
            forward_pressed: true,
            left_pressed: true,
            right_pressed: true,
            ..CameraController::new()
        };
        assert!(controller.is_moving());
        controller.update_camera(&mut camera, 0.5);
        assert_relative_eq!(camera.eye.z, 4.5, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.x, 0.0, epsilon = 1e-5);
    }
}
