// Copyright @yucwang 2026

use crate::core::bsdf::fresnel_cos;
use crate::core::tangent_frame::{build_tangent_frame, local_to_world};
use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::warp::spherical_direction;

fn chi_plus(a: Float) -> Float {
    if a > 0.0 { 1.0 } else { 0.0 }
}

// Microfacet normal distribution with Smith-style shadow masking.
// Half-vector sampling and the shared reflection machinery live in the
// provided methods; implementations supply `d`, `g1` and the
// half-vector warp.
pub trait MicrofacetDistribution: std::fmt::Display + Send + Sync {
    fn alpha(&self) -> Float;

    fn nt(&self) -> Float;

    // Density of microfacet normals, zero below the surface.
    fn d(&self, half: &Vector3f, normal: &Vector3f) -> Float;

    // Single-direction shadow masking, gated on v lying on the same
    // side of the microfacet as of the surface.
    fn g1(&self, v: &Vector3f, half: &Vector3f, normal: &Vector3f) -> Float;

    fn sample_half_vector(&self, seed: &Vector2f) -> Vector3f;

    fn g(&self, dir1: &Vector3f, dir2: &Vector3f, half: &Vector3f, normal: &Vector3f) -> Float {
        self.g1(dir1, half, normal) * self.g1(dir2, half, normal)
    }

    fn fresnel(&self, incoming: &Vector3f, half: &Vector3f) -> Float {
        fresnel_cos(incoming.dot(half).abs(), self.nt())
    }

    // Specular lobe value F * D * G / (4 |cos1| |cos2|).
    fn eval(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float {
        let ldotn = dir1.dot(normal);
        let vdotn = dir2.dot(normal);
        if ldotn <= 0.0 || vdotn <= 0.0 {
            return 0.0;
        }

        let half = (dir1 + dir2).normalize();
        let f = self.fresnel(dir1, &half);
        let d = self.d(&half, normal);
        let g = self.g(dir1, dir2, &half, normal);

        f * d * g / (4.0 * ldotn.abs() * vdotn.abs())
    }

    // Draws a half vector, reflects dir1 about it and reports the
    // resulting solid-angle density for dir2.
    fn sample(&self, dir1: &Vector3f, normal: &Vector3f, seed: &Vector2f) -> (Vector3f, Float) {
        let half_local = self.sample_half_vector(seed);
        let (u, v) = build_tangent_frame(normal);
        let half = local_to_world(&half_local, &u, &v, normal);

        let ldoth = half.dot(dir1);
        let dir2 = (half * (2.0 * ldoth) - dir1).normalize();

        let probability = self.pdf(dir1, &dir2, normal);
        (dir2, probability)
    }

    // D(m) |m . n| mapped through the half-vector Jacobian 1/(4 |d1 . m|).
    fn pdf(&self, dir1: &Vector3f, dir2: &Vector3f, normal: &Vector3f) -> Float {
        let ldotn = dir1.dot(normal);
        let vdotn = dir2.dot(normal);
        if ldotn <= 0.0 || vdotn <= 0.0 {
            return 0.0;
        }

        let half = (dir1 + dir2).normalize();
        let d = self.d(&half, normal);
        let ldoth = dir1.dot(&half);
        let vdoth = dir2.dot(&half);
        if ldoth == 0.0 {
            return 0.0;
        }

        let cos_theta = half.dot(normal).abs();
        let jacobian = 1.0 / (4.0 * ldoth.abs());
        chi_plus(vdoth / vdotn) * chi_plus(ldoth / ldotn) * d * cos_theta * jacobian
    }
}

pub struct Beckmann {
    alpha: Float,
    nt: Float,
}

impl Beckmann {
    pub fn new(alpha: Float, nt: Float) -> Self {
        Self { alpha, nt }
    }
}

impl std::fmt::Display for Beckmann {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Beckmann: {{ alpha: {}, nt: {} }}", self.alpha, self.nt)
    }
}

impl MicrofacetDistribution for Beckmann {
    fn alpha(&self) -> Float {
        self.alpha
    }

    fn nt(&self) -> Float {
        self.nt
    }

    fn d(&self, half: &Vector3f, normal: &Vector3f) -> Float {
        let cos_thetam = half.dot(normal);
        if cos_thetam <= 0.0 {
            return 0.0;
        }

        let cos_thetam2 = cos_thetam * cos_thetam;
        let sin_thetam2 = 1.0 - cos_thetam2;
        let cos_thetam4 = cos_thetam2 * cos_thetam2;
        let tan_thetam2 = sin_thetam2 / cos_thetam2;
        let alpha2 = self.alpha * self.alpha;

        (-tan_thetam2 / alpha2).exp() / (PI * alpha2 * cos_thetam4)
    }

    fn g1(&self, v: &Vector3f, half: &Vector3f, normal: &Vector3f) -> Float {
        let vm = v.dot(half);
        let vn = v.dot(normal);
        if vm / vn <= 0.0 {
            return 0.0;
        }

        let cos_thetav = v.normalize().dot(&normal.normalize()).abs();
        let sin_thetav = (1.0 - cos_thetav * cos_thetav).max(0.0).sqrt();
        if sin_thetav == 0.0 {
            return 1.0;
        }

        let a = cos_thetav / (self.alpha * sin_thetav);
        if a >= 1.6 {
            1.0
        } else {
            (3.535 * a + 2.181 * a * a) / (1.0 + 2.276 * a + 2.577 * a * a)
        }
    }

    fn sample_half_vector(&self, seed: &Vector2f) -> Vector3f {
        let tan_theta2 = -self.alpha * self.alpha * (1.0 - seed.x).ln();
        let cos_theta2 = 1.0 / (1.0 + tan_theta2);
        let cos_theta = cos_theta2.sqrt();
        let sin_theta = (1.0 - cos_theta2).max(0.0).sqrt();

        spherical_direction(sin_theta, cos_theta, 2.0 * PI * seed.y)
    }
}

pub struct Ggx {
    alpha: Float,
    nt: Float,
}

impl Ggx {
    pub fn new(alpha: Float, nt: Float) -> Self {
        Self { alpha, nt }
    }
}

impl std::fmt::Display for Ggx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ggx: {{ alpha: {}, nt: {} }}", self.alpha, self.nt)
    }
}

impl MicrofacetDistribution for Ggx {
    fn alpha(&self) -> Float {
        self.alpha
    }

    fn nt(&self) -> Float {
        self.nt
    }

    fn d(&self, half: &Vector3f, normal: &Vector3f) -> Float {
        let cos_thetam = half.dot(normal);
        if cos_thetam <= 0.0 {
            return 0.0;
        }

        let cos_thetam2 = cos_thetam * cos_thetam;
        let sin_thetam2 = 1.0 - cos_thetam2;
        let cos_thetam4 = cos_thetam2 * cos_thetam2;
        let tan_thetam2 = sin_thetam2 / cos_thetam2;
        let alpha2 = self.alpha * self.alpha;

        alpha2 / (PI * cos_thetam4 * (alpha2 + tan_thetam2) * (alpha2 + tan_thetam2))
    }

    fn g1(&self, v: &Vector3f, half: &Vector3f, normal: &Vector3f) -> Float {
        let vm = v.dot(half);
        let vn = v.dot(normal);
        if vm / vn <= 0.0 {
            return 0.0;
        }

        let cos_thetav = v.normalize().dot(&normal.normalize());
        let sin_thetav2 = (1.0 - cos_thetav * cos_thetav).max(0.0);
        let tan_thetav2 = sin_thetav2 / (cos_thetav * cos_thetav);
        let alpha2 = self.alpha * self.alpha;

        2.0 / (1.0 + (1.0 + alpha2 * tan_thetav2).sqrt())
    }

    fn sample_half_vector(&self, seed: &Vector2f) -> Vector3f {
        let tan_theta2 = self.alpha * self.alpha * seed.x / (1.0 - seed.x);
        let cos_theta2 = 1.0 / (1.0 + tan_theta2);
        let cos_theta = cos_theta2.sqrt();
        let sin_theta = (1.0 - cos_theta2).max(0.0).sqrt();

        spherical_direction(sin_theta, cos_theta, 2.0 * PI * seed.y)
    }
}
