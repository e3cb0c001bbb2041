// Copyright @yucwang 2026

use crate::core::light::{Light, LightFlag, LightSample};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

// Infinitely small emitter with constant intensity in all directions.
pub struct PointLight {
    position: Vector3f,
    intensity: RGBSpectrum,
}

impl PointLight {
    pub fn new(position: Vector3f, intensity: RGBSpectrum) -> Self {
        Self { position, intensity }
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }
}

impl std::fmt::Display for PointLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointLight: {{ position: ({}, {}, {}), intensity: ({}, {}, {}) }}",
               self.position[0], self.position[1], self.position[2],
               self.intensity[0], self.intensity[1], self.intensity[2])
    }
}

impl Light for PointLight {
    fn flag(&self) -> LightFlag {
        LightFlag::DELTA
    }

    fn eval(&self, _ray: &Ray3f) -> RGBSpectrum {
        self.intensity
    }

    fn sample(&self, shading_point: &Vector3f, _seed: &Vector2f) -> LightSample {
        let to_light = self.position - shading_point;
        let dist_squared = to_light.norm_squared();
        if dist_squared <= 0.0 {
            return LightSample::invalid();
        }

        let distance = dist_squared.sqrt();
        LightSample {
            direction: to_light / distance,
            distance,
            attenuation: 1.0 / dist_squared,
            probability: 1.0,
        }
    }

    fn pdf(&self, _ray: &Ray3f) -> Float {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_light_sample() {
        let light = PointLight::new(Vector3f::new(0.0, 3.0, 0.0), RGBSpectrum::gray(10.0));
        let shading_point = Vector3f::new(0.0, 0.0, 4.0);
        let sample = light.sample(&shading_point, &Vector2f::new(0.5, 0.5));

        assert_relative_eq!(sample.direction.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sample.distance, 5.0, epsilon = 1e-12);
        assert_relative_eq!(sample.attenuation, 1.0 / 25.0, epsilon = 1e-12);
        assert_eq!(sample.probability, 1.0);
        assert!(light.flag().contains(LightFlag::DELTA));
    }

    #[test]
    fn test_point_light_eval_is_isotropic() {
        let light = PointLight::new(Vector3f::zeros(), RGBSpectrum::new(1.0, 2.0, 3.0));
        let ray = Ray3f::new(Vector3f::new(5.0, 0.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0), None, None);
        assert_eq!(light.eval(&ray), RGBSpectrum::new(1.0, 2.0, 3.0));
    }
}
