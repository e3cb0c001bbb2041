// Copyright @yucwang 2026

use crate::core::integrator::{Integrator, debug_check_density, shadow_ray};
use crate::core::interaction::SurfaceIntersection;
use crate::core::light::LightFlag;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// Deterministic direct lighting from delta sources only. Area lights
// and the environment are ignored, so the result is noise free.
pub struct PointLightIntegrator;

impl PointLightIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PointLightIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

// Direct illumination from every delta source visible from the hit.
// Shared by the strategies that cannot reach point lights through
// scattered rays.
pub(crate) fn sum_delta_lights(scene: &Scene,
                               intersection: &SurfaceIntersection,
                               to_eye: &Vector3f,
                               rng: &mut LcgRng) -> RGBSpectrum {
    let material = match intersection.material() {
        Some(material) => material,
        None => return RGBSpectrum::default(),
    };

    let normal = intersection.normal();
    let mut radiance = RGBSpectrum::default();
    for light in scene.lights() {
        if !light.flag().contains(LightFlag::DELTA) {
            continue;
        }

        let seed = rng.next_seed();
        let light_sample = light.sample(&intersection.p(), &seed);
        debug_check_density(light_sample.probability);
        let cos_theta = light_sample.direction.dot(&normal);
        if cos_theta <= 0.0 || light_sample.attenuation <= 0.0 {
            continue;
        }

        let occluded = scene.ray_intersection_t(&shadow_ray(
            &intersection.p(),
            &light_sample.direction,
            Some(light_sample.distance),
        ));
        if occluded {
            continue;
        }

        let to_light = Ray3f::new(intersection.p(), light_sample.direction, None, None);
        let emitted = light.eval(&to_light);
        let value = material.eval(to_eye, &light_sample.direction, &normal);
        radiance += emitted * value * (light_sample.attenuation * cos_theta);
    }

    radiance
}

impl Integrator for PointLightIntegrator {
    fn shade(&self,
             scene: &Scene,
             ray: &Ray3f,
             intersection: &SurfaceIntersection,
             _depth: u32,
             rng: &mut LcgRng) -> RGBSpectrum {
        let to_eye = -ray.dir();
        sum_delta_lights(scene, intersection, &to_eye, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::integrator::trace;
    use crate::core::scene::SceneObject;
    use crate::lights::point::PointLight;
    use crate::materials::lambertian::LambertianBSDF;
    use crate::math::constants::PI;
    use crate::shapes::sphere::Sphere;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::zeros(), 1.0)),
            Arc::new(LambertianBSDF::new(RGBSpectrum::gray(0.8))),
        ));
        scene.add_light(Arc::new(PointLight::new(
            Vector3f::new(0.0, 3.0, 0.0),
            RGBSpectrum::gray(10.0),
        )));
        scene
    }

    #[test]
    fn test_point_light_analytic() {
        let scene = lit_sphere_scene();
        let integrator = PointLightIntegrator::new();
        let mut rng = LcgRng::new(11);

        // hits the north pole: cos = 1, distance to the source 2
        let ray = Ray3f::new(
            Vector3f::new(0.0, 2.5, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            None,
            None,
        );
        let radiance = trace(&integrator, &scene, &ray, 0, &mut rng);
        let expected = 10.0 * (0.8 / PI) * (1.0 / 4.0);
        assert_relative_eq!(radiance[0], expected, max_relative = 1e-6);
        assert_relative_eq!(radiance[1], expected, max_relative = 1e-6);
    }

    #[test]
    fn test_point_light_shadowed() {
        let mut scene = lit_sphere_scene();
        // occluder between the pole and the source
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(0.0, 2.0, 0.0), 0.25)),
            Arc::new(LambertianBSDF::new(RGBSpectrum::gray(0.5))),
        ));

        let integrator = PointLightIntegrator::new();
        let mut rng = LcgRng::new(11);
        let ray = Ray3f::new(
            Vector3f::new(0.0, 1.4, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            None,
            None,
        );
        let radiance = trace(&integrator, &scene, &ray, 0, &mut rng);
        assert!(radiance.is_black());
    }
}
