// Copyright @yucwang 2023

use crate::core::bsdf::{BSDF, BSDFSample};
use crate::core::tangent_frame::{build_tangent_frame, local_to_world};
use crate::math::constants::{ INV_PI, Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_cosine_hemisphere, sample_cosine_hemisphere_pdf };

pub struct LambertianBSDF {
    reflectance: RGBSpectrum
}

impl LambertianBSDF {
    pub fn new(reflectance: RGBSpectrum) -> Self {
        Self {
            reflectance,
        }
    }
}

impl std::fmt::Display for LambertianBSDF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LambertianBSDF: {{ reflectance: ({}, {}, {}) }}",
               self.reflectance[0], self.reflectance[1], self.reflectance[2])
    }
}

impl BSDF for LambertianBSDF {
    fn eval(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> RGBSpectrum {
        if dir1.dot(normal) >= 0.0 && dir2.dot(normal) >= 0.0 {
            self.reflectance * INV_PI
        } else {
            RGBSpectrum::default()
        }
    }

    fn sample(&self, _dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> BSDFSample {
        let local = sample_cosine_hemisphere(seed);
        let (u, v) = build_tangent_frame(normal);
        let dir2 = local_to_world(&local, &u, &v, normal);

        let probability = sample_cosine_hemisphere_pdf(dir2.dot(normal).max(0.0));
        BSDFSample::new(dir2, self.reflectance * INV_PI, probability, false)
    }

    fn pdf(&self, _dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float {
        let cos_theta = dir2.dot(normal);
        if cos_theta > 0.0 {
            sample_cosine_hemisphere_pdf(cos_theta)
        } else {
            0.0
        }
    }

    fn diffuse_reflectance(&self) -> RGBSpectrum {
        self.reflectance
    }
}
