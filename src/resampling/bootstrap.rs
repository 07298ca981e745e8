use rand::{Rng, RngCore};

use super::Resampler;
use crate::error::{ConfigError, Result};

/// Resampling with replacement, preserving sample size.
///
/// Every draw returns `data.len()` values picked uniformly with replacement,
/// the classic bootstrap for estimating sampling variability.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapResampler;

impl Resampler for BootstrapResampler {
    fn sample(&self, data: &[f64], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(ConfigError::EmptyInput.into());
        }
        let n = data.len();
        Ok((0..n).map(|_| data[rng.gen_range(0..n)]).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::BrainsurfError;

    #[test]
    fn output_size_matches_input() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let resampled = BootstrapResampler.sample(&data, &mut rng).unwrap();
        assert_eq!(resampled.len(), data.len());
    }

    #[test]
    fn values_come_from_the_input() {
        let data = vec![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(1);
        let resampled = BootstrapResampler.sample(&data, &mut rng).unwrap();
        assert!(resampled.iter().all(|v| data.contains(v)));
    }

    #[test]
    fn draws_with_replacement() {
        // Across repeated draws from a 3-value input, at least one draw
        // must contain a repeated value.
        let data = vec![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(2);
        let saw_duplicate = (0..20).any(|_| {
            let draw = BootstrapResampler.sample(&data, &mut rng).unwrap();
            draw[0] == draw[1] || draw[1] == draw[2] || draw[0] == draw[2]
        });
        assert!(saw_duplicate);
    }

    #[test]
    fn calls_are_independent_draws() {
        let data: Vec<f64> = (0..50).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let first = BootstrapResampler.sample(&data, &mut rng).unwrap();
        let second = BootstrapResampler.sample(&data, &mut rng).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(4);
        let result = BootstrapResampler.sample(&[], &mut rng);
        assert!(matches!(result, Err(BrainsurfError::Config(_))));
    }
}
