// Copyright @yucwang 2026

use crate::core::bsdf::{fresnel, BSDF, BSDFSample};
use crate::core::tangent_frame::{build_tangent_frame, local_to_world};
use crate::math::constants::{INV_PI, Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::sample_cosine_hemisphere;
use std::sync::Arc;

// Fresnel clear coat over a substrate. Sampling is a mixture: with
// probability R a discrete mirror bounce off the coat, otherwise a
// cosine-weighted draw scattered by the substrate with continuous
// density (1 - R) * cos(theta) / pi. The branch decision consumes
// seed.x and the remainder is rescaled for the substrate draw.
pub struct GlazedBSDF {
    refractive_index: Float,
    substrate: Arc<dyn BSDF>,
}

impl GlazedBSDF {
    pub fn new(refractive_index: Float, substrate: Arc<dyn BSDF>) -> Self {
        Self {
            refractive_index,
            substrate,
        }
    }
}

impl std::fmt::Display for GlazedBSDF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GlazedBSDF: {{ refractive_index: {}, substrate: {} }}",
               self.refractive_index, self.substrate)
    }
}

impl BSDF for GlazedBSDF {
    fn eval(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> RGBSpectrum {
        self.substrate.eval(dir1, dir2, normal)
    }

    fn sample(&self, dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> BSDFSample {
        let cos_1 = dir1.dot(normal);
        let reflectance = fresnel(normal, dir1, self.refractive_index);

        if seed.x <= reflectance {
            if cos_1 <= 0.0 {
                return BSDFSample::invalid();
            }
            let dir2 = (normal * (2.0 * cos_1) - dir1).normalize();
            return BSDFSample::new(dir2, RGBSpectrum::gray(reflectance / cos_1), reflectance, true);
        }

        let remainder = Vector2f::new(
            (seed.x - reflectance) / (1.0 - reflectance),
            seed.y,
        );
        let local = sample_cosine_hemisphere(&remainder);
        let (u, v) = build_tangent_frame(normal);
        let dir2 = local_to_world(&local, &u, &v, normal);

        let probability = (1.0 - reflectance) * dir2.dot(normal).max(0.0) * INV_PI;
        let value = self.substrate.eval(dir1, &dir2, normal);
        BSDFSample::new(dir2, value, probability, false)
    }

    fn pdf(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float {
        let cos_theta = dir2.dot(normal);
        if cos_theta <= 0.0 {
            return 0.0;
        }

        let reflectance = fresnel(normal, dir1, self.refractive_index);
        (1.0 - reflectance) * cos_theta * INV_PI
    }

    fn diffuse_reflectance(&self) -> RGBSpectrum {
        self.substrate.diffuse_reflectance()
    }
}
