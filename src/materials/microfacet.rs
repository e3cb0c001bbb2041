// Copyright @yucwang 2026

use crate::core::bsdf::{BSDF, BSDFSample};
use crate::materials::distribution::MicrofacetDistribution;
use crate::math::constants::{INV_PI, Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

// Rough surface: Lambertian base plus one microfacet specular lobe.
// Sampling draws from the specular lobe only, so the reported density
// is the distribution's.
pub struct MicrofacetBSDF {
    diffuse_reflectance: RGBSpectrum,
    specular_color: RGBSpectrum,
    distribution: Box<dyn MicrofacetDistribution>,
}

impl MicrofacetBSDF {
    pub fn new(diffuse_reflectance: RGBSpectrum,
               specular_color: RGBSpectrum,
               distribution: Box<dyn MicrofacetDistribution>) -> Self {
        Self {
            diffuse_reflectance,
            specular_color,
            distribution,
        }
    }
}

impl std::fmt::Display for MicrofacetBSDF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MicrofacetBSDF: {{ diffuse: ({}, {}, {}), specular: ({}, {}, {}), distribution: {} }}",
               self.diffuse_reflectance[0], self.diffuse_reflectance[1], self.diffuse_reflectance[2],
               self.specular_color[0], self.specular_color[1], self.specular_color[2],
               self.distribution)
    }
}

impl BSDF for MicrofacetBSDF {
    fn eval(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> RGBSpectrum {
        if dir1.dot(normal) <= 0.0 || dir2.dot(normal) <= 0.0 {
            return RGBSpectrum::default();
        }

        self.diffuse_reflectance * INV_PI
            + self.specular_color * self.distribution.eval(dir1, dir2, normal)
    }

    fn sample(&self, dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> BSDFSample {
        let (dir2, probability) = self.distribution.sample(dir1, normal, seed);

        if dir1.dot(normal) > 0.0 && dir2.dot(normal) > 0.0 {
            let value = self.diffuse_reflectance * INV_PI
                + self.specular_color * self.distribution.eval(dir1, &dir2, normal);
            BSDFSample::new(dir2, value, probability, false)
        } else {
            BSDFSample::invalid()
        }
    }

    fn pdf(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float {
        if dir1.dot(normal) > 0.0 && dir2.dot(normal) > 0.0 {
            self.distribution.pdf(dir1, dir2, normal)
        } else {
            0.0
        }
    }

    fn diffuse_reflectance(&self) -> RGBSpectrum {
        self.diffuse_reflectance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::materials::distribution::{Beckmann, Ggx};
    use crate::math::constants::PI;
    use approx::assert_relative_eq;

    fn beckmann_bsdf() -> MicrofacetBSDF {
        MicrofacetBSDF::new(
            RGBSpectrum::gray(1.0),
            RGBSpectrum::gray(1.0),
            Box::new(Beckmann::new(0.5, 1.5)),
        )
    }

    fn ggx_bsdf() -> MicrofacetBSDF {
        MicrofacetBSDF::new(
            RGBSpectrum::gray(1.0),
            RGBSpectrum::gray(1.0),
            Box::new(Ggx::new(0.5, 1.5)),
        )
    }

    fn fixture_directions() -> (Vector3f, Vector3f, Vector3f, Vector3f) {
        let angle1 = 60.0 / 180.0 * PI;
        let angle2 = -30.0 / 180.0 * PI;
        let dir1 = Vector3f::new(angle1.sin(), 0.0, angle1.cos());
        let dir_reflect = Vector3f::new(angle2.sin(), 0.0, angle2.cos());
        let dir_refract = Vector3f::new(angle2.sin(), 0.0, -angle2.cos());
        let normal = Vector3f::new(0.0, 0.0, 1.0);
        (dir1, dir_reflect, dir_refract, normal)
    }

    #[test]
    fn test_beckmann_eval() {
        let bsdf = beckmann_bsdf();
        let (dir1, dir_reflect, _, normal) = fixture_directions();

        let value = bsdf.eval(&dir1, &dir_reflect, &normal);
        assert_relative_eq!(value[0], 0.3498099620956212, epsilon = 1e-6);
        assert_relative_eq!(value[1], value[0], epsilon = 1e-12);
    }

    #[test]
    fn test_ggx_eval() {
        let bsdf = ggx_bsdf();
        let (dir1, dir_reflect, dir_refract, normal) = fixture_directions();

        let value = bsdf.eval(&dir1, &dir_reflect, &normal);
        assert_relative_eq!(value[0], 0.3399154913418668, epsilon = 1e-6);

        let value = bsdf.eval(&dir1, &dir_refract, &normal);
        assert!(value.is_black());
    }

    #[test]
    fn test_beckmann_pdf() {
        let bsdf = beckmann_bsdf();
        let (dir1, dir_reflect, dir_refract, normal) = fixture_directions();

        assert_relative_eq!(
            bsdf.pdf(&dir1, &dir_reflect, &normal),
            0.3748090142144676,
            epsilon = 1e-6
        );
        assert_eq!(bsdf.pdf(&dir1, &dir_refract, &normal), 0.0);
    }

    #[test]
    fn test_ggx_pdf() {
        let bsdf = ggx_bsdf();
        let (dir1, dir_reflect, dir_refract, normal) = fixture_directions();

        assert_relative_eq!(
            bsdf.pdf(&dir1, &dir_reflect, &normal),
            0.3014743973187967,
            epsilon = 1e-6
        );
        assert_eq!(bsdf.pdf(&dir1, &dir_refract, &normal), 0.0);
    }

    #[test]
    fn test_beckmann_pdf_integral() {
        let bsdf = beckmann_bsdf();
        let incoming = Vector3f::new((PI / 3.0).sin(), 0.0, (PI / 3.0).cos());
        let normal = Vector3f::new(0.0, 0.0, 1.0);

        let cos_theta_resolution = 100;
        let phi_resolution = 400;
        let mut prob = 0.0;
        for k in 0..phi_resolution {
            let phi = k as Float * 2.0 * PI / (phi_resolution as Float);
            for j in 0..cos_theta_resolution {
                let cos_theta = j as Float / (cos_theta_resolution as Float);
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                let wo = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
                prob += bsdf.pdf(&incoming, &wo, &normal);
            }
        }
        prob = prob * 2.0 * PI / ((cos_theta_resolution * phi_resolution) as Float);

        // the warp leaks a little density below the horizon, so the
        // integral over the upper hemisphere falls short of one
        assert_relative_eq!(prob, 0.7387220488926413, epsilon = 1e-6);
    }

    #[test]
    fn test_beckmann_sample_matches_pdf() {
        let bsdf = beckmann_bsdf();
        let mut rng = LcgRng::new(31);
        let seed = Vector2f::new(0.1, 0.2);

        for _ in 0..100 {
            let cos_theta: Float = rng.next_float();
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let phi = 2.0 * PI * rng.next_float();
            let dir1 = Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta);

            let cos_theta2: Float = rng.next_float();
            let sin_theta2 = (1.0 - cos_theta2 * cos_theta2).max(0.0).sqrt();
            let phi2 = 2.0 * PI * rng.next_float();
            let normal = Vector3f::new(phi2.cos() * sin_theta2, phi2.sin() * sin_theta2, cos_theta2);

            let sample = bsdf.sample(&dir1, &normal, &seed);
            assert_relative_eq!(
                sample.probability,
                bsdf.pdf(&dir1, &sample.dir, &normal),
                epsilon = 1e-9
            );
        }
    }
}
