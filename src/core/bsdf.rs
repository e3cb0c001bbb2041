// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

// One draw from a scattering distribution. `probability` is a
// solid-angle density for continuous samples and a probability mass
// for discrete ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFSample {
    pub dir: Vector3f,
    pub value: RGBSpectrum,
    pub probability: Float,
    pub is_discrete: bool,
}

impl Default for BSDFSample {
    fn default() -> Self {
        Self {
            dir: Vector3f::zeros(),
            value: RGBSpectrum::default(),
            probability: 0.0,
            is_discrete: false,
        }
    }
}

impl BSDFSample {
    pub fn new(dir: Vector3f, value: RGBSpectrum, probability: Float, is_discrete: bool) -> Self {
        Self { dir, value, probability, is_discrete }
    }

    // Zero-probability sample, skipped by every integrator.
    pub fn invalid() -> Self {
        Self::default()
    }
}

// Scattering distributions in world space. Both directions point away
// from the surface; the shading normal is passed in explicitly.
pub trait BSDF: std::fmt::Display + Send + Sync {
    fn eval(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> RGBSpectrum;

    // Draws dir2 given dir1. Deterministic in (dir1, normal, seed).
    fn sample(&self, dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> BSDFSample;

    // Density of the continuous component only; discrete lobes report 0.
    // Must agree with the probability `sample` reports for the same pair.
    fn pdf(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float;

    fn diffuse_reflectance(&self) -> RGBSpectrum;
}

// Unpolarized dielectric Fresnel reflectance for relative index nt.
// The dot product is taken raw: callers pass unnormalized vectors and
// the g-form absorbs the scale. Back-facing directions reflect nothing,
// total internal reflection reflects everything.
pub fn fresnel(normal: &Vector3f, outgoing: &Vector3f, nt: Float) -> Float {
    let c = outgoing.dot(normal);
    if c < 0.0 {
        return 0.0;
    }
    fresnel_cos(c, nt)
}

pub(crate) fn fresnel_cos(c: Float, nt: Float) -> Float {
    let g_squared = nt * nt - 1.0 + c * c;
    if g_squared <= 0.0 {
        return 1.0;
    }

    let g = g_squared.sqrt();
    let ratio = (c * (g + c) - 1.0) / (c * (g - c) + 1.0);
    0.5 * ((g - c) / (g + c)).powi(2) * (1.0 + ratio * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fresnel_values() {
        // raw dots on purpose, the inputs are not unit length
        let f = fresnel(
            &Vector3f::new(1.0, 1.0, 1.0),
            &Vector3f::new(1.0, 1.0, 1.0),
            2.0,
        );
        assert_relative_eq!(f, 0.1549192, epsilon = 1e-4);

        // grazing incidence reflects everything
        let f = fresnel(
            &Vector3f::new(1.0, 1.0, 1.0),
            &Vector3f::new(-1.0, 1.0, 0.0),
            2.0,
        );
        assert_relative_eq!(f, 1.0, epsilon = 1e-4);

        let f = fresnel(
            &Vector3f::new(1.0, 2.0, 0.0),
            &Vector3f::new(-1.0, 1.0, 0.0),
            2.0,
        );
        assert_relative_eq!(f, 0.111111111, epsilon = 1e-4);

        let f = fresnel(
            &Vector3f::new(1.0, 2.0, 0.0),
            &Vector3f::new(-1.0, 1.0, 0.0),
            5.0,
        );
        assert_relative_eq!(f, 0.44444444, epsilon = 1e-4);
    }

    #[test]
    fn test_fresnel_back_facing() {
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let f = fresnel(&normal, &Vector3f::new(0.0, -1.0, 0.0), 1.5);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn test_fresnel_total_internal_reflection() {
        // Leaving a dense medium at a grazing angle, nt < 1
        let f = fresnel_cos(0.1, 1.0 / 1.5);
        assert_eq!(f, 1.0);
    }
}
