use glam::{Mat4, Vec2, Vec3, Vec4};

pub const CAMERA_Z: f32 = 5.0;
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Target sphere radius before tier scaling.
pub const BASE_RADIUS: f32 = 0.3;

/// Plane the crosshair slides along, between the camera and the spawn
/// volume.
pub const CROSSHAIR_PLANE_Z: f32 = -2.0;

/// Fixed perspective camera in front of the spawn volume, looking down -Z.
/// Only the aspect ratio varies, tracking the canvas rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: FOV_Y_DEGREES.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Aspect ratio of a cell rectangle drawn with braille dots. A cell is two
/// dots wide and four tall, and terminal cells are roughly twice as tall as
/// wide, so the dot grid comes out square-ish at w / (2h).
pub fn canvas_aspect(width: u16, height: u16) -> f32 {
    if height == 0 {
        return 1.0;
    }
    width as f32 / (2.0 * height as f32)
}

/// Maps a position inside the viewport (cell units, origin top-left) to
/// normalized device coordinates with +Y up.
pub fn pointer_ndc(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((px / width) * 2.0 - 1.0, -(py / height) * 2.0 + 1.0)
}

/// World-space pick ray through an NDC point: unprojects the near and far
/// plane through the inverse view-projection, origin at the camera eye.
pub fn pointer_ray(camera: &Camera, ndc: Vec2) -> (Vec3, Vec3) {
    let inv = camera.view_projection().inverse();
    let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
    let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let near = near.truncate() / near.w;
    let far = far.truncate() / far.w;
    (camera.eye, (far - near).normalize())
}

/// Nearest non-negative ray parameter where the ray enters the sphere.
/// Assumes a normalized direction.
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Point where the ray crosses the vertical plane at `plane_z`, if that
/// crossing lies ahead of the origin.
pub fn ray_plane_z(ray_origin: Vec3, ray_dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if ray_dir.z.abs() <= 1e-6 {
        return None;
    }
    let t = (plane_z - ray_origin.z) / ray_dir.z;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}

/// Projects a world point to NDC. `None` when the point sits behind the
/// eye.
pub fn world_to_ndc(camera: &Camera, point: Vec3) -> Option<Vec2> {
    let clip = camera.view_projection() * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
}
