//! Recursive shading and the parallel frame renderer.
//!
//! The per-pixel kernel is pure: it reads the scene, camera and settings
//! through a [`RenderContext`] and produces one color, so pixels can be
//! computed in any order and in parallel. The frame renderer drives the
//! kernel over every pixel of the target buffer using Rayon, one row per
//! work item, with an implicit join barrier before the buffer is handed on.

use glam::Vec3A;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::framebuffer::FrameBuffer;
use crate::hittable::Collision;
use crate::material::{Color, Material};
use crate::ray::Ray;
use crate::scene::Scene;

/// Smallest accepted resolution divisor; lower values are clamped here to
/// keep the target buffer from degenerating.
pub const MIN_RESOLUTION_DIVISOR: f32 = 0.8;

/// Knobs consumed by the frame renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Recursion budget for reflective/transmissive bounces. Zero disables
    /// secondary rays entirely.
    pub max_bounces: u32,

    /// The traced buffer is the displayed resolution divided by this factor;
    /// raising it trades sharpness for speed. Values below
    /// [`MIN_RESOLUTION_DIVISOR`] are clamped.
    pub resolution_divisor: f32,
}

impl RenderSettings {
    /// Divisor with the lower clamp applied.
    pub fn clamped_divisor(&self) -> f32 {
        self.resolution_divisor.max(MIN_RESOLUTION_DIVISOR)
    }

    /// Trace-buffer dimensions for a given display resolution. Never returns
    /// a zero-sized extent.
    pub fn scaled_resolution(&self, width: u32, height: u32) -> (u32, u32) {
        let divisor = self.clamped_divisor();
        let w = (width as f32 / divisor) as u32;
        let h = (height as f32 / divisor) as u32;
        (w.max(1), h.max(1))
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_bounces: 2,
            resolution_divisor: 2.5,
        }
    }
}

/// Everything a pixel computation reads: an immutable snapshot of the scene,
/// the camera pose, and the trace settings. Passed explicitly instead of
/// living in process-wide state so renders are deterministic and testable.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Scene to trace.
    pub scene: &'a Scene,
    /// Camera pose for this frame.
    pub camera: &'a Camera,
    /// Trace settings for this frame.
    pub settings: &'a RenderSettings,
}

/// Lambertian attenuation of a light seen from a surface: the cosine between
/// the surface normal and the direction toward the light, clamped at zero.
/// No distance falloff is applied.
fn light_attenuation(normal: Vec3A, light_dir: Vec3A) -> f32 {
    light_dir.dot(normal).max(0.0)
}

/// Direct illumination at a surface point: the ambient term plus one
/// shadow-tested Lambertian contribution per light.
///
/// A shadow ray reaching any emissive surface counts as unobstructed;
/// intervening non-emissive geometry blocks the light.
fn direct_light(point: Vec3A, normal: Vec3A, material: &Material, scene: &Scene) -> Color {
    let mut sum = material.color * scene.ambient;

    for light in &scene.lights {
        let direction = (light.position - point).normalize();
        let shadow = scene.closest_collision(&Ray::new(point, direction));
        if shadow.material.emissivity > 0.0 {
            sum += material.color * light.color * light_attenuation(normal, direction);
        }
    }

    sum
}

/// Trace a ray and shade whatever it hits.
///
/// A miss is black; an emissive hit returns `color * emissivity` without any
/// further work. Everything else goes through [`shade_collision`].
pub fn shade_ray(ray: &Ray, scene: &Scene, bounces: u32) -> Color {
    let hit = scene.closest_collision(ray);
    if !hit.is_hit() {
        return Vec3A::ZERO;
    }
    if hit.material.emissivity > 0.0 {
        return hit.material.color * hit.material.emissivity;
    }
    shade_collision(ray, &hit, scene, bounces)
}

/// Shade a known collision: direct light blended with recursive reflective
/// and transmissive contributions.
///
/// With an exhausted bounce budget (or an inert material) only the direct
/// sum is returned; leftover reflective/transparent energy at the cutoff is
/// dropped, not compensated.
pub fn shade_collision(ray: &Ray, hit: &Collision, scene: &Scene, bounces: u32) -> Color {
    let point = ray.at(hit.near);
    let direct = direct_light(point, hit.normal, &hit.material, scene);

    if bounces == 0 {
        return direct;
    }
    let material = &hit.material;
    if material.reflectivity == 0.0 && material.transparency == 0.0 {
        return direct;
    }

    let mut reflective = Vec3A::ZERO;
    if material.reflectivity > 0.0 {
        let mirrored = ray.direction - 2.0 * ray.direction.dot(hit.normal) * hit.normal;
        reflective = shade_ray(&Ray::new(point, mirrored), scene, bounces - 1);
    }

    let mut transmitted = Vec3A::ZERO;
    if material.transparency != 0.0 {
        // continue from the exit point so the ray crosses the volume
        let mut direction = ray.direction;
        if material.diffraction > 0.0 {
            direction = (ray.direction + hit.normal * material.diffraction).normalize();
        }
        transmitted = shade_ray(&Ray::new(ray.at(hit.far), direction), scene, bounces - 1);
    }

    direct * material.complement()
        + reflective * material.reflectivity
        + transmitted * material.transparency
}

/// Compute the color of pixel (x, y) in a `width` x `height` frame.
///
/// Generates the viewport ray, resolves the primary collision, short-circuits
/// emissive hits and misses, and otherwise shades recursively under the
/// configured bounce budget.
pub fn kernel(ctx: &RenderContext, x: u32, y: u32, width: u32, height: u32) -> Color {
    let ray = ctx.camera.viewport_ray(width, height, x, y);
    let hit = ctx.scene.closest_collision(&ray);

    if hit.material.emissivity > 0.0 {
        return hit.material.color * hit.material.emissivity;
    }
    if !hit.is_hit() {
        return Vec3A::ZERO;
    }

    shade_collision(&ray, &hit, ctx.scene, ctx.settings.max_bounces)
}

/// Render one frame at the given resolution into `buffer`.
///
/// The buffer is reallocated if the dimensions changed and reused otherwise.
/// Rows are traced in parallel; every pixel writes only its own slot, and
/// the function returns only once the whole frame is complete.
pub fn render(buffer: &mut FrameBuffer, width: u32, height: u32, ctx: &RenderContext) {
    if width != buffer.width() || height != buffer.height() {
        buffer.allocate(width, height);
    }

    info!(
        "Tracing {}x{} pixels on {} CPU cores...",
        width,
        height,
        rayon::current_num_threads()
    );
    let start = std::time::Instant::now();
    let progress = ProgressBar::new(height as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} rows ETA: {eta}")
            .expect("static progress template"),
    );

    buffer.rows_mut().enumerate().par_bridge().for_each(|(y, row)| {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = kernel(ctx, x as u32, y as u32, width, height);
        }
        progress.inc(1);
    });

    progress.finish_and_clear();
    info!("Frame rendered in {:.2?}", start.elapsed());
}
