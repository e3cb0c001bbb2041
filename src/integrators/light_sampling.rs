// Copyright @yucwang 2026

use crate::core::integrator::{Integrator, debug_check_density, shadow_ray, trace};
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::EPSILON;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// Direct lighting by sampling the sources: one shadow ray per light
// plus one toward the environment. Scattered rays recurse only through
// discrete lobes, so sharp reflections and refractions come through
// while diffuse interreflection is left out.
pub struct LightSamplingIntegrator {
    max_depth: u32,
}

impl LightSamplingIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Integrator for LightSamplingIntegrator {
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
            let seed = rng.next_seed();
            let light_sample = light.sample(&p, &seed);
            debug_check_density(light_sample.probability);
            if light_sample.probability <= 0.0 || light_sample.attenuation <= 0.0 {
                continue;
            }
            let cos_theta = light_sample.direction.dot(&normal);
            if cos_theta <= 0.0 {
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
        }

        if let Some(environment) = scene.environment() {
            let seed = rng.next_seed();
            let env_sample = environment.sample(&seed);
            debug_check_density(env_sample.pdf);
            if env_sample.pdf > 0.0 {
                let cos_theta = env_sample.direction.dot(&normal);
                if cos_theta > 0.0
                    && !scene.ray_intersection_t(&shadow_ray(&p, &env_sample.direction, None))
                {
                    let value = material.eval(&to_eye, &env_sample.direction, &normal);
                    radiance += env_sample.radiance * value * (cos_theta / env_sample.pdf);
                }
            }
        }

        // sharp reflection and refraction only; a light sample can
        // never land exactly in a discrete direction
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
