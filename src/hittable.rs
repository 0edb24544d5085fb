//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait for geometric primitives, the [`HitSpan`]
//! entry/exit distance pair they report, and the [`Collision`] record produced
//! by the scene-wide closest-collision query.

use glam::Vec3A;

use crate::material::Material;
use crate::ray::Ray;

/// Scale applied to the near hit distance, pulling secondary-ray origins
/// slightly in front of the surface so they do not immediately re-intersect
/// it (shadow acne). Tunable; must stay just below 1.
pub const SELF_HIT_BIAS_NEAR: f32 = 0.99999;

/// Scale applied to the far (exit) hit distance, pushing transmission-ray
/// origins slightly past the back surface. Mirrors [`SELF_HIT_BIAS_NEAR`]
/// around 1.
pub const SELF_HIT_BIAS_FAR: f32 = 2.0 - SELF_HIT_BIAS_NEAR;

/// Entry and exit distances of a ray through a primitive.
///
/// `near` is the closest positive hit distance. For volumes (spheres) `far`
/// is the exit distance used to continue transparent rays; for planes the
/// two coincide. A miss is reported as infinity on both.
#[derive(Debug, Clone, Copy)]
pub struct HitSpan {
    /// Distance to the entry point, or infinity on a miss.
    pub near: f32,
    /// Distance to the exit point, or infinity on a miss.
    pub far: f32,
}

impl HitSpan {
    /// The "no intersection ahead of the origin" result.
    pub const MISS: HitSpan = HitSpan {
        near: f32::INFINITY,
        far: f32::INFINITY,
    };

    /// True if the span represents an actual hit.
    pub fn is_hit(&self) -> bool {
        self.near.is_finite()
    }
}

/// Trait for objects that can be intersected by rays.
pub trait Hittable {
    /// Test for ray intersection, returning the entry/exit distance span.
    ///
    /// Distances are measured along the (unit) ray direction; anything behind
    /// the origin counts as a miss.
    fn intersect(&self, ray: &Ray) -> HitSpan;
}

/// Result of the scene-wide closest-collision query.
///
/// `near` and `far` carry the self-intersection bias already applied, so
/// secondary rays built from them start safely off the surface.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    /// Biased distance to the nearest hit, or infinity when nothing was hit.
    pub near: f32,
    /// Biased exit distance for transparent continuation.
    pub far: f32,
    /// Material at the hit point ([`Material::VOID`] on a miss).
    pub material: Material,
    /// Unit surface normal at the hit point.
    pub normal: Vec3A,
}

impl Collision {
    /// True if the query found any primitive ahead of the ray.
    pub fn is_hit(&self) -> bool {
        self.near.is_finite()
    }
}

/// Ray/sphere span via the geometric projection method.
///
/// Projects the origin-to-center vector onto the ray, rejects spheres behind
/// the origin or farther off-axis than the radius, and derives both quadratic
/// roots. When the near root is behind the origin (ray starts inside), the
/// far root stands in for it.
pub(crate) fn ray_sphere_span(ray: &Ray, center: Vec3A, radius: f32) -> HitSpan {
    let l = center - ray.origin;
    let t_ca = l.dot(ray.direction);

    // sphere is behind the ray origin
    if t_ca < 0.0 {
        return HitSpan::MISS;
    }

    // squared distance from center to the ray axis
    let d2 = (l.dot(l) - t_ca * t_ca).abs();
    let r2 = radius * radius;
    if d2 > r2 {
        return HitSpan::MISS;
    }

    let t_hc = (r2 - d2).sqrt();
    let mut t0 = t_ca - t_hc;
    let mut t1 = t_ca + t_hc;

    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    if t0 < 0.0 {
        t0 = t1;
        if t0 < 0.0 {
            return HitSpan::MISS;
        }
    }

    HitSpan { near: t0, far: t1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_span_is_not_a_hit() {
        assert!(!HitSpan::MISS.is_hit());
        assert!(HitSpan { near: 3.0, far: 5.0 }.is_hit());
    }

    #[test]
    fn span_reports_both_roots() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let span = ray_sphere_span(&ray, Vec3A::ZERO, 1.0);
        assert!((span.near - 4.0).abs() < 1e-5);
        assert!((span.far - 6.0).abs() < 1e-5);
    }

    #[test]
    fn origin_inside_uses_exit_root() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        let span = ray_sphere_span(&ray, Vec3A::ZERO, 2.0);
        assert!((span.near - 2.0).abs() < 1e-5);
        assert!((span.far - 2.0).abs() < 1e-5);
    }

    #[test]
    fn bias_constants_bracket_one() {
        assert!(SELF_HIT_BIAS_NEAR < 1.0);
        assert!(SELF_HIT_BIAS_FAR > 1.0);
        assert!((SELF_HIT_BIAS_NEAR + SELF_HIT_BIAS_FAR - 2.0).abs() < 1e-7);
    }
}
