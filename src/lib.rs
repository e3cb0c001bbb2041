// Copyright @yucwang 2026

pub mod core;
pub mod integrators;
pub mod io;
pub mod lights;
pub mod materials;
pub mod math;
pub mod shapes;

#[cfg(test)]
mod test_utils;
