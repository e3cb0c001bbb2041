// Copyright @yucwang 2026

pub mod cubemap;
pub mod point;
pub mod rectangle;
