// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightFlag(u8);

impl LightFlag {
    // Position or direction fixed, cannot be hit by a ray
    pub const DELTA: Self = Self(1 << 0);
    // Emission spread over surface area
    pub const AREA: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for LightFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

// One shadow-ray proposal toward the source. `direction` is unit length
// and points from the shading point toward the light, `attenuation`
// folds the source-side cosine and the squared distance, `probability`
// is measured w.r.t. the light's own sampling domain (area for surface
// sources, unity for delta sources).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    pub direction: Vector3f,
    pub distance: Float,
    pub attenuation: Float,
    pub probability: Float,
}

impl LightSample {
    pub fn invalid() -> Self {
        Self {
            direction: Vector3f::zeros(),
            distance: 0.0,
            attenuation: 0.0,
            probability: 0.0,
        }
    }
}

pub trait Light: std::fmt::Display + Send + Sync {
    fn flag(&self) -> LightFlag;

    // Hook for sources that carry geometry; area lights inject their
    // surface into the scene here so rays can hit them.
    fn register(self: Arc<Self>, scene: &mut Scene) {
        let _ = scene;
    }

    // Radiance leaving the source along `ray` (surface to light).
    fn eval(&self, ray: &Ray3f) -> RGBSpectrum;

    fn sample(&self, shading_point: &Vector3f, seed: &Vector2f) -> LightSample;

    // Density of `sample` picking the point `ray` runs into.
    fn pdf(&self, ray: &Ray3f) -> Float;
}

#[cfg(test)]
mod tests {
    use super::LightFlag;

    #[test]
    fn test_light_flag_combination() {
        let combined = LightFlag::DELTA | LightFlag::AREA;
        assert!(combined.contains(LightFlag::DELTA));
        assert!(combined.contains(LightFlag::AREA));
        assert!(!LightFlag::DELTA.contains(LightFlag::AREA));
    }
}
