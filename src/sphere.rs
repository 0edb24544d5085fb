//! Sphere primitive for ray tracing.

use glam::Vec3A;

use crate::hittable::{ray_sphere_span, HitSpan, Hittable};
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub position: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radius values are clamped to 0.0.
    pub fn new(position: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3A) -> Vec3A {
        (point - self.position).normalize()
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> HitSpan {
        ray_sphere_span(ray, self.position, self.radius)
    }
}
