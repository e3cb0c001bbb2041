// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::light::Light;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use std::sync::Arc;

pub struct SurfaceIntersection {
    p: Vector3f,
    normal: Vector3f,
    uv: Vector2f,
    t: Float,
    material: Option<Arc<dyn BSDF>>,
    light: Option<Arc<dyn Light>>,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_normal: Vector3f,
               new_uv: Vector2f,
               new_t: Float) -> Self {
        Self { p: new_p, normal: new_normal, uv: new_uv, t: new_t,
               material: None, light: None }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn material(&self) -> Option<&dyn BSDF> {
        self.material.as_deref()
    }

    pub fn with_material(&self, new_material: Arc<dyn BSDF>) -> Self {
        Self {
            p: self.p,
            normal: self.normal,
            uv: self.uv,
            t: self.t,
            material: Some(new_material),
            light: self.light.clone(),
        }
    }

    pub fn light(&self) -> Option<&Arc<dyn Light>> {
        self.light.as_ref()
    }

    pub fn with_light(&self, new_light: Option<Arc<dyn Light>>) -> Self {
        Self {
            p: self.p,
            normal: self.normal,
            uv: self.uv,
            t: self.t,
            material: self.material.clone(),
            light: new_light,
        }
    }
}
