// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{EPSILON, Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// A shading strategy: turns one surface hit into outgoing radiance.
// `depth` counts recursive bounces and is threaded through `trace`.
pub trait Integrator: Send + Sync {
    fn shade(&self,
             scene: &Scene,
             ray: &Ray3f,
             intersection: &SurfaceIntersection,
             depth: u32,
             rng: &mut LcgRng) -> RGBSpectrum;
}

// Follows `ray` into the scene: shade on a hit, fall through to the
// environment on a miss.
pub fn trace(integrator: &dyn Integrator,
             scene: &Scene,
             ray: &Ray3f,
             depth: u32,
             rng: &mut LcgRng) -> RGBSpectrum {
    match scene.ray_intersection(ray) {
        Some(intersection) => integrator.shade(scene, ray, &intersection, depth, rng),
        None => match scene.environment() {
            Some(environment) => environment.eval(&ray.dir()),
            None => RGBSpectrum::default(),
        },
    }
}

// Sampling densities must be finite and non-negative. A violation is a
// bug in the distribution that produced them; stop in debug builds
// instead of averaging it into the estimate.
pub(crate) fn debug_check_density(density: Float) {
    debug_assert!(density >= 0.0 && density.is_finite(),
                  "invalid sampling density: {}", density);
}

// Shadow segment from `point` toward `direction`, shortened at both
// ends so neither the shading surface nor the source geometry
// self-occludes. `distance` of None tests against everything, for
// environment directions.
pub fn shadow_ray(point: &Vector3f, direction: &Vector3f, distance: Option<Float>) -> Ray3f {
    Ray3f::new(*point, *direction,
               Some(EPSILON),
               distance.map(|d| d - EPSILON))
}
