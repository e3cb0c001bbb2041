// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

// Flat rectangle spanned by an orthonormal frame derived from a facing
// normal and an up direction, the same frame area lights use.
pub struct Rectangle {
    center: Vector3f,
    normal: Vector3f,
    basis_u: Vector3f,
    basis_v: Vector3f,
    width: Float,
    height: Float,
}

impl Rectangle {
    pub fn new(center: Vector3f,
               normal: Vector3f,
               up: Vector3f,
               width: Float,
               height: Float) -> Self {
        let basis_w = (-normal).normalize();
        let basis_u = up.cross(&basis_w).normalize();
        let basis_v = basis_w.cross(&basis_u).normalize();

        Self {
            center,
            normal: normal.normalize(),
            basis_u,
            basis_v,
            width,
            height,
        }
    }

    fn intersect_plane(&self, ray: &Ray3f) -> Option<(Float, Vector3f, Vector2f)> {
        let denom = ray.dir().dot(&self.normal);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.center - ray.origin()).dot(&self.normal) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        let offset = p - self.center;
        let u = offset.dot(&self.basis_u);
        let v = offset.dot(&self.basis_v);
        if u.abs() > 0.5 * self.width || v.abs() > 0.5 * self.height {
            return None;
        }

        let uv = Vector2f::new(u / self.width + 0.5, v / self.height + 0.5);
        Some((t, p, uv))
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (t, p, uv) = self.intersect_plane(ray)?;
        Some(SurfaceIntersection::new(p, self.normal, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_plane(ray).is_some()
    }
}
