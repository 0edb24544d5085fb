//! Surface material model.
//!
//! Each primitive carries a [`Material`] describing how incoming light is
//! split at a hit point: a locally shaded diffuse fraction, a mirrored
//! fraction, and a transmitted fraction. Emissive materials mark light
//! sources and terminate shading when hit.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
///
/// Channels are linear, unclamped f32; values may exceed [0, 1] or go
/// negative transiently. Clamping and gamma belong to the output layer.
pub type Color = Vec3A;

/// Per-primitive surface properties.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Base surface color (also the emitted color for light sources).
    pub color: Color,

    /// Emission strength. Non-zero marks the primitive as a light source:
    /// a hit returns `color * emissivity` directly and shading stops there.
    pub emissivity: f32,

    /// Fraction of outgoing light taken from the mirror bounce, in [0, 1].
    pub reflectivity: f32,

    /// Fraction of light transmitted through the surface, in [0, 1].
    /// `reflectivity + transparency` should not exceed 1; the remainder is
    /// the locally shaded diffuse fraction.
    pub transparency: f32,

    /// Directional bending applied to transmitted rays. The continuing
    /// direction gains `normal * diffraction` before renormalization.
    pub diffraction: f32,
}

impl Material {
    /// Material reported for a miss: black, non-emissive, inert.
    pub const VOID: Material = Material {
        color: Vec3A::ZERO,
        emissivity: 0.0,
        reflectivity: 0.0,
        transparency: 0.0,
        diffraction: 0.0,
    };

    /// Plain diffuse material of the given color.
    pub fn diffuse(color: Color) -> Self {
        Self { color, ..Self::default() }
    }

    /// Fully self-luminous material, used when a light sphere is hit.
    pub fn emissive(color: Color) -> Self {
        Self {
            color,
            emissivity: 1.0,
            ..Self::VOID
        }
    }

    /// The locally shaded diffuse fraction: `max(0, 1 - reflectivity - transparency)`.
    pub fn complement(&self) -> f32 {
        (1.0 - self.reflectivity - self.transparency).max(0.0)
    }
}

impl Default for Material {
    /// Matte white surface.
    fn default() -> Self {
        Self {
            color: Vec3A::ONE,
            emissivity: 0.0,
            reflectivity: 0.0,
            transparency: 0.0,
            diffraction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_is_remaining_fraction() {
        let m = Material {
            reflectivity: 0.3,
            transparency: 0.5,
            ..Material::default()
        };
        assert!((m.complement() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn complement_clamps_at_zero() {
        let m = Material {
            reflectivity: 0.9,
            transparency: 0.9,
            ..Material::default()
        };
        assert_eq!(m.complement(), 0.0);
    }

    #[test]
    fn blend_weights_sum_to_one() {
        // For any material with reflectivity + transparency <= 1, the three
        // shading weights partition the outgoing energy exactly.
        for (r, t) in [(0.0, 0.0), (0.8, 0.0), (0.25, 0.75), (0.1, 0.4)] {
            let m = Material {
                reflectivity: r,
                transparency: t,
                ..Material::default()
            };
            let sum = m.complement() + m.reflectivity + m.transparency;
            assert!((sum - 1.0).abs() < 1e-6, "weights must sum to 1, got {sum}");
            assert!(m.complement() >= 0.0 && m.reflectivity >= 0.0 && m.transparency >= 0.0);
        }
    }

    #[test]
    fn void_is_black_and_inert() {
        let m = Material::VOID;
        assert_eq!(m.color, Vec3A::ZERO);
        assert_eq!(m.emissivity, 0.0);
        assert_eq!(m.complement(), 1.0);
    }
}
