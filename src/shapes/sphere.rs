// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    // Nearest root of the quadratic inside the ray's segment. Relies
    // on the ray direction being unit length.
    fn nearest_t(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        if ray.test_segment(t_near) {
            return Some(t_near);
        }
        let t_far = -b + sqrt_d;
        if ray.test_segment(t_far) {
            return Some(t_far);
        }

        None
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.nearest_t(ray)?;
        let p = ray.at(t);
        let normal = (p - self.center) / self.radius;

        let phi = normal.y.atan2(normal.x);
        let theta = normal.z.clamp(-1.0, 1.0).acos();
        let uv = Vector2f::new((phi + PI) / (2.0 * PI), theta / PI);

        Some(SurfaceIntersection::new(p, normal, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.nearest_t(ray).is_some()
    }
}
