// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// Flat debug shading: paints every hit with the surface's diffuse
// reflectance, no lighting at all.
pub struct ReflectanceIntegrator;

impl ReflectanceIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReflectanceIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for ReflectanceIntegrator {
    fn shade(&self,
             _scene: &Scene,
             _ray: &Ray3f,
             intersection: &SurfaceIntersection,
             _depth: u32,
             _rng: &mut LcgRng) -> RGBSpectrum {
        match intersection.material() {
            Some(material) => material.diffuse_reflectance(),
            None => RGBSpectrum::default(),
        }
    }
}
