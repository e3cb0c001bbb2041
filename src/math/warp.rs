// Copyright @yucwang 2023

use super::constants::{ INV_PI, PI, Float, Vector2f, Vector3f };

pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.).sqrt();
    let phi: Float = 2. * PI * u.y;

    return Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_hemisphere_pdf() -> Float {
    return INV_PI / 2.
}

// z = sqrt(1 - u) puts the density at cos(theta) / pi
pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = (1. - u.x).max(0.).sqrt();
    let r: Float = u.x.max(0.).sqrt();
    let phi: Float = 2. * PI * u.y;

    return Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    return cos_theta * INV_PI;
}

pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    return Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/* Tests for sampling warps */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::test_utils::test_against_cdf;
    use approx::assert_relative_eq;

    #[test]
    fn test_cosine_hemisphere_theta_distribution() {
        let mut rng = LcgRng::new(17);
        // theta is distributed with cdf 0.5 - 0.5 * cos(2 * theta)
        test_against_cdf(
            &mut |rng: &mut LcgRng| {
                let u = rng.next_seed();
                sample_cosine_hemisphere(&u).z.min(1.0).acos()
            },
            &|theta: Float| 0.5 - 0.5 * (2.0 * theta).cos(),
            0.0,
            PI / 2.0,
            &mut rng,
        );
    }

    #[test]
    fn test_uniform_hemisphere_z_distribution() {
        let mut rng = LcgRng::new(42);
        test_against_cdf(
            &mut |rng: &mut LcgRng| {
                let u = rng.next_seed();
                sample_uniform_hemisphere(&u).z
            },
            &|z: Float| z,
            0.0,
            1.0,
            &mut rng,
        );
    }

    #[test]
    fn test_cosine_hemisphere_pdf_normalization() {
        let theta_res = 256;
        let phi_res = 512;
        let mut integral = 0.0;
        for i in 0..theta_res {
            let theta = PI / 2.0 * (i as Float + 0.5) / (theta_res as Float);
            for _ in 0..phi_res {
                integral += sample_cosine_hemisphere_pdf(theta.cos()) * theta.sin();
            }
        }
        integral *= (PI / 2.0 / theta_res as Float) * (2.0 * PI / phi_res as Float);
        assert_relative_eq!(integral, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_sample_unit_length() {
        let mut rng = LcgRng::new(7);
        for _ in 0..128 {
            let u = rng.next_seed();
            assert_relative_eq!(sample_cosine_hemisphere(&u).norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(sample_uniform_hemisphere(&u).norm(), 1.0, epsilon = 1e-9);
        }
    }
}
