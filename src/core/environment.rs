// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSample {
    pub direction: Vector3f,
    pub radiance: RGBSpectrum,
    pub pdf: Float,
}

// Radiance arriving from infinitely far away. Directions point from
// the shading point outward; pdfs are solid-angle densities over the
// full sphere.
pub trait Environment: Send + Sync {
    fn eval(&self, direction: &Vector3f) -> RGBSpectrum;

    fn sample(&self, seed: &Vector2f) -> EnvironmentSample;

    fn pdf(&self, direction: &Vector3f) -> Float;
}
