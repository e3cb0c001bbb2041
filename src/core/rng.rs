// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_float(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }

    pub fn next_seed(&mut self) -> Vector2f {
        let x = self.next_float();
        let y = self.next_float();
        Vector2f::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::LcgRng;

    #[test]
    fn test_lcg_rng_range() {
        let mut rng = LcgRng::new(12345);
        for _ in 0..1024 {
            let v = rng.next_float();
            assert!(v >= 0.0 && v <= 1.0);
        }
    }

    #[test]
    fn test_lcg_rng_deterministic() {
        let mut a = LcgRng::new(99);
        let mut b = LcgRng::new(99);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
