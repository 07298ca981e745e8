use rand::RngCore;

use super::Resampler;
use crate::error::{ConfigError, Result};

/// Resampling without replacement at a reduced size.
///
/// Each draw returns `n_samples` values at distinct input positions, in
/// random order.
#[derive(Debug, Clone, Copy)]
pub struct SubsampleResampler {
    n_samples: usize,
}

impl SubsampleResampler {
    /// Creates a resampler drawing `n_samples` values per call.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `n_samples` is zero.
    pub fn new(n_samples: usize) -> Result<Self> {
        if n_samples == 0 {
            return Err(ConfigError::NonPositiveParameter {
                parameter: "n_samples",
                value: 0.0,
            }
            .into());
        }
        Ok(Self { n_samples })
    }
}

impl Resampler for SubsampleResampler {
    fn sample(&self, data: &[f64], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(ConfigError::EmptyInput.into());
        }
        if self.n_samples > data.len() {
            return Err(ConfigError::SubsampleTooLarge {
                requested: self.n_samples,
                available: data.len(),
            }
            .into());
        }
        let indices = rand::seq::index::sample(rng, data.len(), self.n_samples);
        Ok(indices.iter().map(|i| data[i]).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::BrainsurfError;

    #[test]
    fn draws_exactly_the_requested_size() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let resampled = SubsampleResampler::new(30)
            .unwrap()
            .sample(&data, &mut rng)
            .unwrap();
        assert_eq!(resampled.len(), 30);
    }

    #[test]
    fn indices_are_distinct() {
        // Distinct input values, so repeats would show up as duplicates.
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let resampled = SubsampleResampler::new(60)
            .unwrap()
            .sample(&data, &mut rng)
            .unwrap();
        let unique: HashSet<u64> = resampled.iter().map(|v| v.to_bits()).collect();
        assert_eq!(unique.len(), resampled.len());
        assert!(resampled.iter().all(|v| data.contains(v)));
    }

    #[test]
    fn oversized_request_is_rejected() {
        let data = vec![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(2);
        let result = SubsampleResampler::new(4).unwrap().sample(&data, &mut rng);
        assert!(matches!(result, Err(BrainsurfError::Config(_))));
    }

    #[test]
    fn zero_size_is_rejected_at_construction() {
        assert!(matches!(
            SubsampleResampler::new(0),
            Err(BrainsurfError::Config(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = SubsampleResampler::new(1).unwrap().sample(&[], &mut rng);
        assert!(matches!(result, Err(BrainsurfError::Config(_))));
    }
}
