use rand::seq::SliceRandom;
use rand::RngCore;

use super::Resampler;
use crate::error::{ConfigError, Result};

/// Random relabeling of the input order.
///
/// Returns a bijection of the original sample: same size, same composition,
/// shuffled positions. Used to build null distributions under an
/// exchangeability assumption rather than to estimate sampling variability.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationResampler;

impl Resampler for PermutationResampler {
    fn sample(&self, data: &[f64], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(ConfigError::EmptyInput.into());
        }
        let mut permuted = data.to_vec();
        permuted.shuffle(rng);
        Ok(permuted)
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
    fn output_is_a_bijection_of_the_input() {
        let data: Vec<f64> = (0..50).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let permuted = PermutationResampler.sample(&data, &mut rng).unwrap();
        assert_eq!(permuted.len(), data.len());

        let mut sorted = permuted;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert_eq!(sorted, data);
    }

    #[test]
    fn order_actually_changes() {
        let data: Vec<f64> = (0..50).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let permuted = PermutationResampler.sample(&data, &mut rng).unwrap();
        assert_ne!(permuted, data);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let data: Vec<f64> = (0..20).map(f64::from).collect();
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = PermutationResampler.sample(&data, &mut rng_a).unwrap();
        let b = PermutationResampler.sample(&data, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let result = PermutationResampler.sample(&[], &mut rng);
        assert!(matches!(result, Err(BrainsurfError::Config(_))));
    }
}
