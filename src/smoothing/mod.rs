mod gaussian_kernel;
mod heat_kernel;
mod laplace;
mod nearest_neighbor;

pub use gaussian_kernel::GaussianKernelSmoother;
pub use heat_kernel::HeatKernelSmoother;
pub use nearest_neighbor::NearestNeighborSmoother;

use crate::error::Result;
use crate::surface::Surface;

/// A spatial smoothing strategy over surface data.
///
/// Implementations hold only their fixed parameters; `transform` is a pure
/// function of its input and always returns a new [`Surface`], never
/// mutating the one passed in. Hemispheres are smoothed independently.
pub trait Smoother {
    /// Pipeline-compatibility no-op; smoothers learn nothing from the data.
    fn fit(&mut self, _x: &Surface) -> &mut Self
    where
        Self: Sized,
    {
        self
    }

    /// Produces a smoothed copy of `x`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an edgeless mesh and a numerical
    /// error when a hemisphere's smoothing system is degenerate.
    fn transform(&self, x: &Surface) -> Result<Surface>;
}

/// Output rescaling applied after nearest-neighbor smoothing.
///
/// Both policies appear in this family of tools; they are not equivalent,
/// so the choice is the caller's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Renormalization {
    /// Re-center the smoothed data to the input's per-hemisphere mean,
    /// preserving the input's scale. Spatial variance still shrinks with
    /// every averaging pass.
    #[default]
    MatchInput,
    /// Z-score the smoothed data to zero mean and unit standard deviation
    /// regardless of the input's scale.
    Standardize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::mesh::Mesh;
    use crate::surface::{Hemisphere, SurfaceInput};

    #[test]
    fn fit_is_a_no_op_before_transform() {
        let mesh = Mesh::icosphere(1);
        let n = mesh.n_vertices();
        #[allow(clippy::cast_precision_loss)]
        let data: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
        let mut inputs = BTreeMap::new();
        inputs.insert(
            Hemisphere::Left,
            SurfaceInput {
                mesh,
                data,
                medial_mask: None,
            },
        );
        let x = Surface::from_inputs(inputs, false).unwrap();

        let plain = NearestNeighborSmoother::new(2).transform(&x).unwrap();
        let mut fitted_smoother = NearestNeighborSmoother::new(2);
        let fitted = fitted_smoother.fit(&x).transform(&x).unwrap();
        assert_eq!(
            plain.part(Hemisphere::Left).unwrap().data(),
            fitted.part(Hemisphere::Left).unwrap().data(),
        );
    }
}
