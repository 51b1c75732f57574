//! Scene model: one perspective camera, one box mesh, one output surface.
//!
//! This is the data the render loop draws; rasterization itself lives with
//! the window in the binary crate.

use glam::{Mat4, Vec3};

use crate::offset::Offset;

/// Camera distance from the origin along +z.
pub const CAMERA_Z:      f32 = 5.0;
pub const CAMERA_NEAR:   f32 = 0.1;
pub const CAMERA_FAR:    f32 = 1000.0;
pub const CAMERA_FOV:    f32 = 75.0;
/// Deepest box whose front face stays in front of the near plane.  The
/// rasterizer does not clip, so deeper boxes are rejected at config time.
pub const MAX_BOX_DEPTH: f32 = 2.0 * (CAMERA_Z - CAMERA_NEAR);

// ════════════════════════════════════════════════════════════════════════════
// Camera
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view, degrees.
    pub fov_deg:  f32,
    pub aspect:   f32,
    pub near:     f32,
    pub far:      f32,
    pub position: Vec3,
    pub target:   Vec3,
    projection:   Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = PerspectiveCamera {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
            target:   Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection();
        cam
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mesh
// ════════════════════════════════════════════════════════════════════════════

/// An axis-aligned box with a flat (unlit) colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMesh {
    pub width:    f32,
    pub height:   f32,
    pub depth:    f32,
    /// 0xRRGGBB
    pub color:    u32,
    pub position: Vec3,
}

/// Triangle list over [`BoxMesh::vertices`], counter-clockwise from outside.
pub const BOX_TRIANGLES: [[usize; 3]; 12] = [
    [4, 5, 6], [4, 6, 7], // +z
    [1, 0, 3], [1, 3, 2], // -z
    [5, 1, 2], [5, 2, 6], // +x
    [0, 4, 7], [0, 7, 3], // -x
    [7, 6, 2], [7, 2, 3], // +y
    [0, 1, 5], [0, 5, 4], // -y
];

impl BoxMesh {
    pub fn new(width: f32, height: f32, depth: f32, color: u32) -> Self {
        BoxMesh { width, height, depth, color, position: Vec3::ZERO }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Object-space corners: indices 0–3 on the back face (-z), 4–7 on the
    /// front (+z), each face ordered (-x,-y) (+x,-y) (+x,+y) (-x,+y).
    pub fn vertices(&self) -> [Vec3; 8] {
        let (hx, hy, hz) = (self.width / 2.0, self.height / 2.0, self.depth / 2.0);
        [
            Vec3::new(-hx, -hy, -hz),
            Vec3::new( hx, -hy, -hz),
            Vec3::new( hx,  hy, -hz),
            Vec3::new(-hx,  hy, -hz),
            Vec3::new(-hx, -hy,  hz),
            Vec3::new( hx, -hy,  hz),
            Vec3::new( hx,  hy,  hz),
            Vec3::new(-hx,  hy,  hz),
        ]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width:  usize,
    pub height: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera:  PerspectiveCamera,
    pub mesh:    BoxMesh,
    surface:     SurfaceSize,
}

impl Scene {
    /// Camera at [`CAMERA_Z`] with a 75° field of view, looking at the origin.
    pub fn new(surface: SurfaceSize, mesh: BoxMesh) -> Self {
        let aspect = surface.width.max(1) as f32 / surface.height.max(1) as f32;
        Scene {
            camera: PerspectiveCamera::new(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR),
            mesh,
            surface,
        }
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Match the camera aspect and output size to a resized viewport.
    /// Returns false (and changes nothing) for a zero-area size.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.camera.set_aspect(width as f32 / height as f32);
        self.surface = SurfaceSize { width, height };
        true
    }

    /// Copy the offset into the mesh position; z is left alone.
    pub fn apply_offset(&mut self, offset: Offset) {
        self.mesh.position.x = offset.x;
        self.mesh.position.y = offset.y;
    }

    /// Model-view-projection for the mesh.
    pub fn mvp(&self) -> Mat4 {
        self.camera.projection() * self.camera.view() * self.mesh.model()
    }

    /// Project an object-space point to surface pixels; `z` is NDC depth.
    /// `None` when the point is behind the camera.
    pub fn project(&self, mvp: &Mat4, p: Vec3) -> Option<Vec3> {
        let clip = mvp.mul_vec4(p.extend(1.0));
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) / 2.0 * self.surface.width as f32,
            (1.0 - ndc.y) / 2.0 * self.surface.height as f32,
            ndc.z,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(SurfaceSize { width: 800, height: 600 }, BoxMesh::new(1.0, 2.0, 1.0, 0xFF0000))
    }

    #[test]
    fn resize_updates_aspect_and_surface_only() {
        let mut s = scene();
        s.apply_offset(Offset::new(1.5, -0.5));
        let mesh_before = s.mesh;

        assert!(s.resize(1024, 512));
        assert_eq!(s.camera.aspect, 2.0);
        assert_eq!(s.surface(), SurfaceSize { width: 1024, height: 512 });
        assert_eq!(s.mesh, mesh_before);
        assert_eq!(
            s.camera.projection(),
            Mat4::perspective_rh(75f32.to_radians(), 2.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn zero_area_resize_is_ignored() {
        let mut s = scene();
        assert!(!s.resize(0, 300));
        assert_eq!(s.surface(), SurfaceSize { width: 800, height: 600 });
        assert_eq!(s.camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn offset_moves_xy_not_z() {
        let mut s = scene();
        s.mesh.position.z = -1.0;
        s.apply_offset(Offset::new(2.0, -1.0));
        assert_eq!(s.mesh.position, Vec3::new(2.0, -1.0, -1.0));
    }

    #[test]
    fn origin_projects_to_surface_centre() {
        let s = scene();
        let p = s.project(&s.mvp(), Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn positive_x_offset_projects_right() {
        let mut s = scene();
        s.apply_offset(Offset::new(1.0, 1.0));
        let p = s.project(&s.mvp(), Vec3::ZERO).unwrap();
        assert!(p.x > 400.0);
        assert!(p.y < 300.0);
    }

    #[test]
    fn deepest_allowed_box_stays_in_front_of_near_plane() {
        let s = Scene::new(
            SurfaceSize { width: 800, height: 600 },
            BoxMesh::new(1.0, 1.0, MAX_BOX_DEPTH * 0.99, 0),
        );
        let mvp = s.mvp();
        for v in s.mesh.vertices() {
            let p = s.project(&mvp, v).unwrap();
            assert!((0.0..=1.0).contains(&p.z), "depth {} out of range", p.z);
        }
    }

    #[test]
    fn box_past_camera_loses_vertices() {
        let s = Scene::new(
            SurfaceSize { width: 800, height: 600 },
            BoxMesh::new(1.0, 1.0, MAX_BOX_DEPTH + 1.0, 0),
        );
        let mvp = s.mvp();
        assert!(s.mesh.vertices().iter().any(|&v| s.project(&mvp, v).is_none()));
    }

    #[test]
    fn box_vertices_match_dimensions() {
        let m = BoxMesh::new(1.0, 2.0, 1.0, 0);
        let v = m.vertices();
        assert_eq!(v[0], Vec3::new(-0.5, -1.0, -0.5));
        assert_eq!(v[6], Vec3::new(0.5, 1.0, 0.5));
    }
}
