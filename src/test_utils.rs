// Copyright @yucwang 2026

//! Shared statistical helpers for sampling tests.

use crate::core::rng::LcgRng;
use crate::math::constants::Float;

const BIN_COUNT: usize = 10;
const TRIAL_COUNT: usize = 10000;
// chi-squared critical value for 9 degrees of freedom at p = 0.01
const CHI_SQUARED_CRITICAL: Float = 21.666;

/// Routes `log` output through the test harness. Safe to call from
/// every test, only the first call wins.
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Draws samples from `sample_fn` and runs a chi-squared test of the
/// binned counts against the analytic `cdf` over `[min, max]`.
pub fn test_against_cdf(
    sample_fn: &mut dyn FnMut(&mut LcgRng) -> Float,
    cdf: &dyn Fn(Float) -> Float,
    min: Float,
    max: Float,
    rng: &mut LcgRng,
) {
    let bin_width = (max - min) / BIN_COUNT as Float;
    let mut observed = [0usize; BIN_COUNT];
    for _ in 0..TRIAL_COUNT {
        let x = sample_fn(rng);
        assert!(x >= min - 1e-9 && x <= max + 1e-9,
                "sample {} outside [{}, {}]", x, min, max);
        let bin = (((x - min) / bin_width) as usize).min(BIN_COUNT - 1);
        observed[bin] += 1;
    }

    let total = cdf(max) - cdf(min);
    let mut chi_squared = 0.0;
    for bin in 0..BIN_COUNT {
        let lo = min + bin as Float * bin_width;
        let hi = lo + bin_width;
        let expected = TRIAL_COUNT as Float * (cdf(hi) - cdf(lo)) / total;
        assert!(expected > 5.0, "bin {} expects too few samples for the test", bin);
        let diff = observed[bin] as Float - expected;
        chi_squared += diff * diff / expected;
    }

    assert!(chi_squared < CHI_SQUARED_CRITICAL,
            "chi-squared statistic {} exceeds critical value {}",
            chi_squared, CHI_SQUARED_CRITICAL);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_samples_pass() {
        let mut rng = LcgRng::new(7);
        test_against_cdf(
            &mut |rng: &mut LcgRng| rng.next_float(),
            &|x: Float| x,
            0.0,
            1.0,
            &mut rng,
        );
    }

    #[test]
    #[should_panic]
    fn test_skewed_samples_fail() {
        let mut rng = LcgRng::new(7);
        test_against_cdf(
            &mut |rng: &mut LcgRng| rng.next_float() * rng.next_float(),
            &|x: Float| x,
            0.0,
            1.0,
            &mut rng,
        );
    }
}
