// Copyright @yucwang 2026

use crate::core::integrator::{Integrator, debug_check_density};
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::integrators::point_light::sum_delta_lights;
use crate::math::constants::EPSILON;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// Direct lighting by sampling the scattering distribution: one ray per
// hit, which finds area sources and the environment by running into
// them. Point lights cannot be hit by rays, so they get their own
// deterministic loop.
pub struct BSDFSamplingIntegrator {
    max_depth: u32,
}

impl BSDFSamplingIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Integrator for BSDFSamplingIntegrator {
    fn shade(&self,
             scene: &Scene,
             ray: &Ray3f,
             intersection: &SurfaceIntersection,
             depth: u32,
             rng: &mut LcgRng) -> RGBSpectrum {
        let mut radiance = match intersection.light() {
            Some(light) => light.eval(ray),
            None => RGBSpectrum::default(),
        };
        let material = match intersection.material() {
            Some(material) => material,
            None => return radiance,
        };

        let to_eye = -ray.dir();
        let normal = intersection.normal();
        let p = intersection.p();

        let seed = rng.next_seed();
        let bsdf_sample = material.sample(&to_eye, &normal, &seed);
        debug_check_density(bsdf_sample.probability);
        if bsdf_sample.probability > 0.0 {
            let scattered = Ray3f::new(p, bsdf_sample.dir, Some(EPSILON), None);
            let incident = match scene.ray_intersection(&scattered) {
                None => match scene.environment() {
                    Some(environment) => environment.eval(&bsdf_sample.dir),
                    None => RGBSpectrum::default(),
                },
                Some(hit) => {
                    if bsdf_sample.is_discrete {
                        if depth < self.max_depth {
                            self.shade(scene, &scattered, &hit, depth + 1, rng)
                        } else {
                            RGBSpectrum::default()
                        }
                    } else {
                        // continuous rays stop at the first surface
                        // and only collect its emission
                        match hit.light() {
                            Some(light) => light.eval(&scattered),
                            None => RGBSpectrum::default(),
                        }
                    }
                }
            };

            let cos_theta = bsdf_sample.dir.dot(&normal).abs();
            radiance += incident * bsdf_sample.value * (cos_theta / bsdf_sample.probability);
        }

        radiance += sum_delta_lights(scene, intersection, &to_eye, rng);
        radiance
    }
}
