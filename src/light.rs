//! Point light, hit-testable as a small sphere.
//!
//! Lights participate in intersection like ordinary geometry: they occlude,
//! and a ray hitting one sees a fully emissive surface. That is what makes
//! them visible as bright spots and what shadow rays test for.

use glam::Vec3A;

use crate::hittable::{ray_sphere_span, HitSpan, Hittable};
use crate::material::Color;
use crate::ray::Ray;

/// Fixed hit-test radius shared by all lights.
pub const LIGHT_RADIUS: f32 = 0.618;

/// Point light with a color and scalar intensity.
#[derive(Debug, Clone)]
pub struct Light {
    /// Light position in world coordinates.
    pub position: Vec3A,

    /// Emitted color (linear RGB).
    pub color: Color,

    /// Scalar intensity.
    pub intensity: f32,
}

impl Light {
    /// Create a new light.
    pub fn new(position: Vec3A, color: Color, intensity: f32) -> Self {
        Self { position, color, intensity }
    }
}

impl Hittable for Light {
    fn intersect(&self, ray: &Ray) -> HitSpan {
        ray_sphere_span(ray, self.position, LIGHT_RADIUS)
    }
}
