// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::environment::Environment;
use crate::core::interaction::SurfaceIntersection;
use crate::core::light::Light;
use crate::core::shape::Shape;
use crate::math::ray::Ray3f;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn BSDF>,
    pub light: Option<Arc<dyn Light>>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>) -> Self {
        Self { shape, material, light: None }
    }

    pub fn with_light(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>, light: Arc<dyn Light>) -> Self {
        Self { shape, material, light: Some(light) }
    }
}

pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<Arc<dyn Light>>,
    environment: Option<Arc<dyn Environment>>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            environment: None,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    // Registers the light, letting it inject its own geometry first.
    pub fn add_light(&mut self, light: Arc<dyn Light>) {
        light.clone().register(self);
        self.lights.push(light);
    }

    pub fn set_environment(&mut self, environment: Arc<dyn Environment>) {
        self.environment = Some(environment);
    }

    pub fn lights(&self) -> &Vec<Arc<dyn Light>> {
        &self.lights
    }

    pub fn environment(&self) -> Option<&Arc<dyn Environment>> {
        self.environment.as_ref()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut nearest: Option<(usize, SurfaceIntersection)> = None;
        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(ray) {
                if !ray.test_segment(hit.t()) {
                    continue;
                }
                let closer = match &nearest {
                    Some((_, best)) => hit.t() < best.t(),
                    None => true,
                };
                if closer {
                    nearest = Some((idx, hit));
                }
            }
        }

        nearest.map(|(idx, hit)| {
            let object = &self.objects[idx];
            hit.with_material(object.material.clone())
                .with_light(object.light.clone())
        })
    }

    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        for object in &self.objects {
            if object.shape.ray_intersection_t(ray) {
                return true;
            }
        }

        false
    }
}
