mod bootstrap;
mod permutation;
mod subsample;

pub use bootstrap::BootstrapResampler;
pub use permutation::PermutationResampler;
pub use subsample::SubsampleResampler;

use rand::RngCore;

use crate::error::Result;

/// A stochastic resampling strategy over a sample axis.
///
/// Each call draws one resampled variant, independently of previous calls;
/// callers decide how many replicates to draw and own the RNG, so replicate
/// streams are reproducible under a seeded generator.
pub trait Resampler {
    /// Draws one resampled variant of `data`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for empty input, or for
    /// estimator-specific size violations.
    fn sample(&self, data: &[f64], rng: &mut dyn RngCore) -> Result<Vec<f64>>;
}
