//! Scene container and the closest-collision query.
//!
//! Primitives live in separate typed vectors scanned linearly; at the scene
//! sizes this renderer targets (around ten primitives) a linear scan is the
//! intended algorithm and an acceleration structure would be overhead.
//!
//! The scene is treated as a read-only snapshot for the duration of a render
//! pass. Mutation (editing positions, materials, lights) happens strictly
//! between frames.

use glam::Vec3A;

use crate::hittable::{Collision, Hittable, SELF_HIT_BIAS_FAR, SELF_HIT_BIAS_NEAR};
use crate::light::Light;
use crate::material::{Color, Material};
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Damping applied when deriving the ambient term from the light colors.
pub const AMBIENT_DAMPING: f32 = 0.2;

/// Collection of primitives and lights forming a scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Sphere primitives.
    pub spheres: Vec<Sphere>,
    /// Infinite planes.
    pub planes: Vec<Plane>,
    /// Point lights (also hit-testable, see [`crate::light`]).
    pub lights: Vec<Light>,
    /// Scene-wide base illumination added regardless of light visibility.
    pub ambient: Color,
}

impl Scene {
    /// Empty scene with black ambient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the ambient term as the mean of the light colors, scaled by
    /// [`AMBIENT_DAMPING`]. With no lights the current ambient is left
    /// untouched (there is no mean to take).
    pub fn ambient_from_lights(&mut self) {
        if self.lights.is_empty() {
            return;
        }
        let sum: Vec3A = self.lights.iter().map(|l| l.color).sum();
        self.ambient = sum * (1.0 / self.lights.len() as f32) * AMBIENT_DAMPING;
    }

    /// Scan every primitive and return the nearest hit ahead of the ray.
    ///
    /// Spheres are tested first, then lights, then planes; on exact distance
    /// ties the first primitive seen wins. The returned distances carry the
    /// self-intersection bias so secondary rays start safely off the surface.
    /// When nothing is hit, the collision reports infinite distance and
    /// [`Material::VOID`].
    pub fn closest_collision(&self, ray: &Ray) -> Collision {
        let mut near = f32::INFINITY;
        let mut far = f32::INFINITY;
        let mut material = Material::VOID;
        let mut normal = Vec3A::ZERO;

        for sphere in &self.spheres {
            let span = sphere.intersect(ray);
            if span.near < near {
                near = span.near;
                far = span.far;
                material = sphere.material;
                normal = sphere.normal_at(ray.at(span.near));
            }
        }

        for light in &self.lights {
            let span = light.intersect(ray);
            if span.near < near {
                near = span.near;
                far = span.far;
                material = Material::emissive(light.color);
                normal = (ray.at(span.near) - light.position).normalize();
            }
        }

        for plane in &self.planes {
            let span = plane.intersect(ray);
            if span.near < near {
                near = span.near;
                far = span.near;
                material = plane.material;
                normal = plane.normal;
            }
        }

        Collision {
            near: near * SELF_HIT_BIAS_NEAR,
            far: far * SELF_HIT_BIAS_FAR,
            material,
            normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .spheres
            .push(Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, Material::diffuse(Vec3A::ONE)));
        scene
    }

    #[test]
    fn empty_scene_reports_miss() {
        let scene = Scene::new();
        let hit = scene.closest_collision(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)));
        assert!(!hit.is_hit());
        assert_eq!(hit.material.color, Vec3A::ZERO);
        assert_eq!(hit.material.emissivity, 0.0);
    }

    #[test]
    fn near_distance_carries_bias_below_surface() {
        let scene = single_sphere_scene();
        let hit = scene.closest_collision(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)));
        assert!(hit.is_hit());
        // raw near distance is 4; the biased value sits just below it
        assert!(hit.near < 4.0);
        assert!((hit.near - 4.0).abs() < 1e-3);
        // and the biased exit distance sits just beyond the raw 6
        assert!(hit.far > 6.0);
        assert!((hit.far - 6.0).abs() < 1e-3);
    }

    #[test]
    fn nearest_of_two_spheres_wins() {
        let mut scene = Scene::new();
        scene
            .spheres
            .push(Sphere::new(Vec3A::new(0.0, 0.0, -10.0), 1.0, Material::diffuse(Vec3A::X)));
        scene
            .spheres
            .push(Sphere::new(Vec3A::new(0.0, 0.0, -4.0), 1.0, Material::diffuse(Vec3A::Y)));
        let hit = scene.closest_collision(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)));
        assert_eq!(hit.material.color, Vec3A::Y);
    }

    #[test]
    fn exact_tie_goes_to_first_seen() {
        let mut scene = Scene::new();
        scene
            .spheres
            .push(Sphere::new(Vec3A::new(0.0, 0.0, -4.0), 1.0, Material::diffuse(Vec3A::X)));
        scene
            .spheres
            .push(Sphere::new(Vec3A::new(0.0, 0.0, -4.0), 1.0, Material::diffuse(Vec3A::Y)));
        let hit = scene.closest_collision(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)));
        assert_eq!(hit.material.color, Vec3A::X);
    }

    #[test]
    fn light_hit_is_fully_emissive() {
        let mut scene = Scene::new();
        scene.lights.push(Light::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.9, 0.2, 0.3), 1.0));
        let hit = scene.closest_collision(&Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0)));
        assert!(hit.is_hit());
        assert_eq!(hit.material.emissivity, 1.0);
        assert_eq!(hit.material.color, Vec3A::new(0.9, 0.2, 0.3));
    }

    #[test]
    fn plane_hit_uses_plane_normal_and_collapsed_far() {
        let mut scene = Scene::new();
        scene.planes.push(Plane::new(
            Vec3A::new(0.0, -1.0, 0.0),
            Vec3A::new(0.0, 1.0, 0.0),
            Material::diffuse(Vec3A::new(0.0, 0.25, 0.0)),
        ));
        let hit = scene.closest_collision(&Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0)));
        assert!((hit.normal - Vec3A::new(0.0, 1.0, 0.0)).length() < 1e-6);
        // far is the (biased) same surface distance, not an exit point
        assert!((hit.far - hit.near) < 1e-3);
    }

    #[test]
    fn ambient_is_damped_mean_of_light_colors() {
        let mut scene = Scene::new();
        scene.lights.push(Light::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0), 1.0));
        scene.lights.push(Light::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), 1.0));
        scene.ambient_from_lights();
        assert!((scene.ambient - Vec3A::new(0.1, 0.1, 0.0)).length() < 1e-6);
    }

    #[test]
    fn ambient_untouched_without_lights() {
        let mut scene = Scene::new();
        scene.ambient = Vec3A::splat(0.3);
        scene.ambient_from_lights();
        assert_eq!(scene.ambient, Vec3A::splat(0.3));
    }
}
