// Copyright @yucwang 2026

pub mod bsdf_sampling;
pub mod light_sampling;
pub mod mis;
pub mod point_light;
pub mod reflectance;

pub use bsdf_sampling::BSDFSamplingIntegrator;
pub use light_sampling::LightSamplingIntegrator;
pub use mis::MISIntegrator;
pub use point_light::PointLightIntegrator;
pub use reflectance::ReflectanceIntegrator;
