//! Infinite plane primitive.

use glam::Vec3A;

use crate::hittable::{HitSpan, Hittable};
use crate::material::Material;
use crate::ray::Ray;

/// A ray whose direction projects onto the normal by less than this is
/// treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Infinite plane defined by a point on it and its unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Any point on the plane.
    pub position: Vec3A,

    /// Plane normal. Must be unit length.
    pub normal: Vec3A,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Plane {
    /// Create a new plane through `position` with the given normal.
    pub fn new(position: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            position,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> HitSpan {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() <= PARALLEL_EPSILON {
            return HitSpan::MISS;
        }

        let t = (self.position - ray.origin).dot(self.normal) / denom;
        if t >= 0.0 {
            // no volume to exit: the far distance coincides with the near one
            HitSpan { near: t, far: t }
        } else {
            HitSpan::MISS
        }
    }
}
