// Copyright @yucwang 2026

use crate::core::bsdf::{fresnel, BSDF, BSDFSample};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

// Smooth dielectric interface. Both lobes are discrete, so `eval` and
// `pdf` are identically zero and all energy moves through `sample`.
pub struct GlassBSDF {
    refractive_index: Float,
}

impl GlassBSDF {
    pub fn new(refractive_index: Float) -> Self {
        Self { refractive_index }
    }
}

impl std::fmt::Display for GlassBSDF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GlassBSDF: {{ refractive_index: {} }}", self.refractive_index)
    }
}

impl BSDF for GlassBSDF {
    fn eval(&self, _dir1: &Vector3f, _dir2: &Vector3f, _normal: &Vector3f) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    fn sample(&self, dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> BSDFSample {
        // Flip the normal toward dir1 when the ray starts inside
        let inside = dir1.dot(normal) <= 0.0;
        let (n1, n2, normal) = if inside {
            (self.refractive_index, 1.0, -normal)
        } else {
            (1.0, self.refractive_index, *normal)
        };

        let cos_1 = dir1.dot(&normal);
        if cos_1 <= 0.0 {
            return BSDFSample::invalid();
        }

        let cos_2_squared = 1.0 - n1 * n1 * (1.0 - cos_1 * cos_1) / (n2 * n2);
        let total_internal_reflection = cos_2_squared < 0.0;
        let reflectance = if total_internal_reflection {
            1.0
        } else {
            fresnel(&normal, dir1, n2 / n1)
        };

        if seed.x <= reflectance {
            let dir2 = (normal * (2.0 * cos_1) - dir1).normalize();
            BSDFSample::new(dir2, RGBSpectrum::gray(reflectance / cos_1), reflectance, true)
        } else if !total_internal_reflection {
            let cos_2 = cos_2_squared.sqrt();
            let transmittance = 1.0 - reflectance;
            let dir2 = ((normal * cos_1 - dir1) * (n1 / n2) - normal * cos_2).normalize();
            BSDFSample::new(dir2, RGBSpectrum::gray(transmittance / cos_2), transmittance, true)
        } else {
            BSDFSample::invalid()
        }
    }

    fn pdf(&self, _dir1: &Vector3f, _dir2: &Vector3f, _normal: &Vector3f) -> Float {
        0.0
    }

    fn diffuse_reflectance(&self) -> RGBSpectrum {
        RGBSpectrum::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_incidence_reflection() {
        let bsdf = GlassBSDF::new(1.5);
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        let dir1 = Vector3f::new(0.0, 0.0, 1.0);

        // R at normal incidence is ((n - 1) / (n + 1))^2 = 0.04
        let sample = bsdf.sample(&dir1, &normal, &Vector2f::new(0.02, 0.5));
        assert!(sample.is_discrete);
        assert_relative_eq!(sample.probability, 0.04, epsilon = 1e-6);
        assert_relative_eq!(sample.dir, dir1, epsilon = 1e-9);
        assert_relative_eq!(sample.value[0], 0.04, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_incidence_refraction() {
        let bsdf = GlassBSDF::new(1.5);
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        let dir1 = Vector3f::new(0.0, 0.0, 1.0);

        let sample = bsdf.sample(&dir1, &normal, &Vector2f::new(0.5, 0.5));
        assert!(sample.is_discrete);
        assert_relative_eq!(sample.probability, 0.96, epsilon = 1e-6);
        // straight through
        assert_relative_eq!(sample.dir, -dir1, epsilon = 1e-9);
    }

    #[test]
    fn test_refraction_obeys_snell() {
        let bsdf = GlassBSDF::new(1.5);
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        let angle = 40.0f64.to_radians();
        let dir1 = Vector3f::new(angle.sin(), 0.0, angle.cos());

        let sample = bsdf.sample(&dir1, &normal, &Vector2f::new(0.99, 0.5));
        assert!(sample.probability > 0.0);
        let sin_transmitted = sample.dir.xy().norm();
        assert_relative_eq!(sin_transmitted, angle.sin() / 1.5, epsilon = 1e-9);
        assert!(sample.dir.z < 0.0);
    }

    #[test]
    fn test_total_internal_reflection() {
        let bsdf = GlassBSDF::new(1.5);
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        // from inside, beyond the critical angle (asin(1/1.5) ~ 41.8 deg)
        let angle = 60.0f64.to_radians();
        let dir1 = Vector3f::new(angle.sin(), 0.0, -angle.cos());

        let sample = bsdf.sample(&dir1, &normal, &Vector2f::new(0.999999, 0.5));
        assert!(sample.is_discrete);
        assert_relative_eq!(sample.probability, 1.0, epsilon = 1e-12);
        // mirror reflection about the flipped normal
        assert_relative_eq!(sample.dir.x, -angle.sin(), epsilon = 1e-9);
        assert_relative_eq!(sample.dir.z, -angle.cos(), epsilon = 1e-9);
    }

    #[test]
    fn test_continuous_component_is_empty() {
        let bsdf = GlassBSDF::new(1.5);
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        let dir1 = Vector3f::new(0.0, 0.6, 0.8);
        let dir2 = Vector3f::new(0.0, -0.6, 0.8);

        assert!(bsdf.eval(&dir1, &dir2, &normal).is_black());
        assert_eq!(bsdf.pdf(&dir1, &dir2, &normal), 0.0);
        assert!(bsdf.diffuse_reflectance().is_black());
    }
}
