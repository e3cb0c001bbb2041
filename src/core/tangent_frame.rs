// Copyright @yucwang 2026

use crate::math::constants::Vector3f;

// Orthonormal basis around w, seeded with the coordinate axis of
// smallest magnitude. Returns zero vectors when w is degenerate so
// callers zero out the contribution instead of propagating NaN.
pub fn build_tangent_frame(w: &Vector3f) -> (Vector3f, Vector3f) {
    let ax = w.x.abs();
    let ay = w.y.abs();
    let az = w.z.abs();
    let axis = if ax <= ay && ax <= az {
        Vector3f::new(1.0, 0.0, 0.0)
    } else if ay <= ax && ay <= az {
        Vector3f::new(0.0, 1.0, 0.0)
    } else {
        Vector3f::new(0.0, 0.0, 1.0)
    };

    let u = match axis.cross(w).try_normalize(1e-12) {
        Some(u) => u,
        None => return (Vector3f::zeros(), Vector3f::zeros()),
    };
    let v = match w.cross(&u).try_normalize(1e-12) {
        Some(v) => v,
        None => return (Vector3f::zeros(), Vector3f::zeros()),
    };
    (u, v)
}

pub fn world_to_local(v: &Vector3f, t: &Vector3f, b: &Vector3f, n: &Vector3f) -> Vector3f {
    Vector3f::new(v.dot(t), v.dot(b), v.dot(n))
}

pub fn local_to_world(v: &Vector3f, t: &Vector3f, b: &Vector3f, n: &Vector3f) -> Vector3f {
    t * v.x + b * v.y + n * v.z
}
