// Copyright @yucwang 2026

pub mod distribution;
pub mod glass;
pub mod glazed;
pub mod lambertian;
pub mod microfacet;
