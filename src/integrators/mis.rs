// Copyright @yucwang 2026

use crate::core::integrator::{Integrator, debug_check_density, shadow_ray, trace};
use crate::core::interaction::SurfaceIntersection;
use crate::core::light::LightFlag;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::EPSILON;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

// Combines light sampling and BSDF sampling per source with the
// balance heuristic [Veach & Guibas 1995]. Light probabilities are
// converted from area to solid angle so both densities share a domain;
// the weight then folds into the divisor: f * cos / (pdf_a + pdf_b).
pub struct MISIntegrator {
    max_depth: u32,
}

impl MISIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Integrator for MISIntegrator {
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

        for light in scene.lights() {
            if light.flag().contains(LightFlag::DELTA) {
                // delta sources have a single strategy, no weighting
                let seed = rng.next_seed();
                let light_sample = light.sample(&p, &seed);
                debug_check_density(light_sample.probability);
                let cos_theta = light_sample.direction.dot(&normal);
                if light_sample.probability <= 0.0
                    || light_sample.attenuation <= 0.0
                    || cos_theta <= 0.0
                {
                    continue;
                }
                let occluded = scene.ray_intersection_t(&shadow_ray(
                    &p,
                    &light_sample.direction,
                    Some(light_sample.distance),
                ));
                if occluded {
                    continue;
                }

                let to_light = Ray3f::new(p, light_sample.direction, None, None);
                let emitted = light.eval(&to_light);
                let value = material.eval(&to_eye, &light_sample.direction, &normal);
                radiance += emitted * value
                    * (light_sample.attenuation * cos_theta / light_sample.probability);
                continue;
            }

            // strategy a: a point on the source
            let seed = rng.next_seed();
            let light_sample = light.sample(&p, &seed);
            debug_check_density(light_sample.probability);
            if light_sample.probability > 0.0 && light_sample.attenuation > 0.0 {
                let cos_theta = light_sample.direction.dot(&normal);
                let occluded = cos_theta <= 0.0
                    || scene.ray_intersection_t(&shadow_ray(
                        &p,
                        &light_sample.direction,
                        Some(light_sample.distance),
                    ));
                if !occluded {
                    let to_light = Ray3f::new(p, light_sample.direction, None, None);
                    let emitted = light.eval(&to_light);
                    if !emitted.is_black() {
                        // area density times d^2 / cos_source, which is
                        // exactly probability / attenuation
                        let pdf_light = light_sample.probability / light_sample.attenuation;
                        let pdf_bsdf =
                            material.pdf(&to_eye, &light_sample.direction, &normal);
                        debug_check_density(pdf_bsdf);
                        let value =
                            material.eval(&to_eye, &light_sample.direction, &normal);
                        radiance += emitted * value * (cos_theta / (pdf_light + pdf_bsdf));
                    }
                }
            }

            // strategy b: a scattered direction that happens to run
            // into the same source
            let seed = rng.next_seed();
            let bsdf_sample = material.sample(&to_eye, &normal, &seed);
            debug_check_density(bsdf_sample.probability);
            if !bsdf_sample.is_discrete && bsdf_sample.probability > 0.0 {
                let scattered = Ray3f::new(p, bsdf_sample.dir, Some(EPSILON), None);
                if let Some(hit) = scene.ray_intersection(&scattered) {
                    if let Some(hit_light) = hit.light() {
                        if Arc::ptr_eq(hit_light, light) {
                            let emitted = hit_light.eval(&scattered);
                            let cos_source = -bsdf_sample.dir.dot(&hit.normal());
                            if cos_source > 0.0 && !emitted.is_black() {
                                let dist_squared = (hit.p() - p).norm_squared();
                                let pdf_light =
                                    light.pdf(&scattered) * dist_squared / cos_source;
                                debug_check_density(pdf_light);
                                let cos_theta = bsdf_sample.dir.dot(&normal);
                                radiance += emitted * bsdf_sample.value
                                    * (cos_theta / (bsdf_sample.probability + pdf_light));
                            }
                        }
                    }
                }
            }
        }

        if let Some(environment) = scene.environment() {
            // strategy a: a direction from the environment map
            let seed = rng.next_seed();
            let env_sample = environment.sample(&seed);
            debug_check_density(env_sample.pdf);
            if env_sample.pdf > 0.0 {
                let cos_theta = env_sample.direction.dot(&normal);
                if cos_theta > 0.0
                    && !scene.ray_intersection_t(&shadow_ray(&p, &env_sample.direction, None))
                {
                    let pdf_bsdf = material.pdf(&to_eye, &env_sample.direction, &normal);
                    debug_check_density(pdf_bsdf);
                    let value = material.eval(&to_eye, &env_sample.direction, &normal);
                    radiance += env_sample.radiance * value
                        * (cos_theta / (env_sample.pdf + pdf_bsdf));
                }
            }

            // strategy b: a scattered direction that escapes the scene
            let seed = rng.next_seed();
            let bsdf_sample = material.sample(&to_eye, &normal, &seed);
            debug_check_density(bsdf_sample.probability);
            if !bsdf_sample.is_discrete && bsdf_sample.probability > 0.0 {
                let scattered = Ray3f::new(p, bsdf_sample.dir, Some(EPSILON), None);
                if scene.ray_intersection(&scattered).is_none() {
                    let pdf_env = environment.pdf(&bsdf_sample.dir);
                    debug_check_density(pdf_env);
                    let cos_theta = bsdf_sample.dir.dot(&normal);
                    radiance += environment.eval(&bsdf_sample.dir) * bsdf_sample.value
                        * (cos_theta / (bsdf_sample.probability + pdf_env));
                }
            }
        }

        // discrete lobes carry full weight, no other strategy can
        // propose their directions
        if depth < self.max_depth {
            let seed = rng.next_seed();
            let bsdf_sample = material.sample(&to_eye, &normal, &seed);
            debug_check_density(bsdf_sample.probability);
            if bsdf_sample.is_discrete && bsdf_sample.probability > 0.0 {
                let scattered = Ray3f::new(p, bsdf_sample.dir, Some(EPSILON), None);
                let incident = trace(self, scene, &scattered, depth + 1, rng);
                let cos_theta = bsdf_sample.dir.dot(&normal).abs();
                radiance += incident * bsdf_sample.value
                    * (cos_theta / bsdf_sample.probability);
            }
        }

        radiance
    }
}
