// Copyright @yucwang 2021

pub mod bsdf;
pub mod environment;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod rng;
pub mod scene;
pub mod shape;
pub mod tangent_frame;
