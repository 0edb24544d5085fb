//! Camera snapshot and viewport ray generation.
//!
//! The camera itself (movement, mouse look, pose integration) belongs to the
//! input layer; the renderer only consumes an immutable snapshot of it, taken
//! once per frame before the pixel loop starts.

use glam::Vec3A;

use crate::ray::Ray;

/// Read-only camera pose consumed by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world coordinates.
    pub position: Vec3A,
    /// Unit look direction.
    pub look_dir: Vec3A,
    /// Unit up vector.
    pub up: Vec3A,
    /// Field of view in radians.
    pub fov: f32,
}

impl Camera {
    /// Cast the ray from the camera through pixel (x, y) of a `width` x
    /// `height` buffer.
    ///
    /// The image plane sits at distance `1 / (fov + 0.1)` along the look
    /// direction, a monotonic but non-physical mapping (wider fov pulls the
    /// plane closer). The per-pixel step is `1 / width` on BOTH axes, so
    /// non-square buffers stretch the vertical field of view slightly. Both
    /// quirks are part of the fixed camera model and are reproduced exactly;
    /// do not replace this with a calibrated pinhole projection.
    pub fn viewport_ray(&self, width: u32, height: u32, x: u32, y: u32) -> Ray {
        let d = 1.0 / (self.fov + 0.1);

        // screen-right and screen-up in world space
        let vx = -self.up.cross(self.look_dir).normalize();
        let vy = vx.cross(self.look_dir).normalize();

        let base = self.position + self.look_dir * d;

        let dv = 1.0 / width as f32;
        let dx = x as f32 - width as f32 / 2.0;
        let dy = y as f32 - height as f32 / 2.0;

        let plane_point = base + vx * (dv * dx) + vy * (dv * dy);

        Ray::new(self.position, (plane_point - self.position).normalize())
    }
}

impl Default for Camera {
    /// The first-person viewer's starting pose: on the +z axis looking down
    /// -z with a 90 degree field of view.
    fn default() -> Self {
        Self {
            position: Vec3A::new(0.0, 0.0, 3.0),
            look_dir: Vec3A::new(0.0, 0.0, -1.0),
            up: Vec3A::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_2,
        }
    }
}
