use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::Smoother;
use crate::error::{ConfigError, Result};
use crate::mesh::Mesh;
use crate::surface::Surface;

/// Distance-weighted Gaussian smoothing over geodesic neighborhoods.
///
/// Per vertex, neighbors within three standard deviations of geodesic
/// (edge-path) distance are collected with Dijkstra's algorithm and averaged
/// under Gaussian weights `exp(-d^2 / (2 sigma^2))`, with
/// `sigma = fwhm / 2.355`. The weights are renormalized per vertex, so the
/// kernel integrates to one even at mask boundaries.
#[derive(Debug, Clone, Copy)]
pub struct GaussianKernelSmoother {
    fwhm: f64,
}

/// FWHM of a Gaussian is `2 sqrt(2 ln 2)` standard deviations.
const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949;

impl GaussianKernelSmoother {
    /// Creates a smoother with the given full-width-at-half-maximum
    /// bandwidth, in mesh coordinate units.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `fwhm` is not strictly positive.
    pub fn new(fwhm: f64) -> Result<Self> {
        if !fwhm.is_finite() || fwhm <= 0.0 {
            return Err(ConfigError::NonPositiveParameter {
                parameter: "fwhm",
                value: fwhm,
            }
            .into());
        }
        Ok(Self { fwhm })
    }
}

impl Smoother for GaussianKernelSmoother {
    fn transform(&self, x: &Surface) -> Result<Surface> {
        let mut smoothed = x.clone();
        let sigma = self.fwhm / FWHM_PER_SIGMA;
        let radius = 3.0 * sigma;

        for (hemi, part) in smoothed.parts_mut() {
            let neighbors = edge_lengths(part.mesh(), part.medial_mask());
            if neighbors.iter().all(Vec::is_empty) {
                return Err(ConfigError::EdgelessMesh { hemi }.into());
            }

            let data = part.data().to_vec();
            let mut output = vec![f64::NAN; data.len()];
            for (i, value) in data.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let mut weight_sum = 0.0;
                let mut value_sum = 0.0;
                for (j, distance) in dijkstra_ball(&neighbors, i, radius) {
                    if data[j].is_finite() {
                        let weight = (-distance * distance / (2.0 * sigma * sigma)).exp();
                        weight_sum += weight;
                        value_sum += weight * data[j];
                    }
                }
                output[i] = value_sum / weight_sum;
            }
            part.set_data(output);
        }
        Ok(smoothed)
    }
}

/// Per-vertex neighbor lists with Euclidean edge lengths. Edges touching a
/// masked vertex are dropped, mirroring the adjacency builder's policy.
fn edge_lengths(mesh: &Mesh, mask: &[bool]) -> Vec<Vec<(u32, f64)>> {
    let coordinates = mesh.coordinates();
    let mut neighbors: Vec<Vec<(u32, f64)>> = vec![Vec::new(); mesh.n_vertices()];
    for &[a, b, c] in mesh.faces() {
        for (i, j) in [(a, b), (a, c), (b, c)] {
            if !mask[i as usize] || !mask[j as usize] {
                continue;
            }
            if neighbors[i as usize].iter().any(|&(n, _)| n == j) {
                continue;
            }
            let length = (coordinates[i as usize] - coordinates[j as usize]).norm();
            neighbors[i as usize].push((j, length));
            neighbors[j as usize].push((i, length));
        }
    }
    neighbors
}

#[derive(Debug, Clone, Copy)]
struct State {
    vertex: u32,
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the nearest vertex first. Ties on
        // distance break on the vertex index so `Ord` and `Eq` agree.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Shortest edge-path distances from `source` out to `radius`, inclusive of
/// the source itself at distance zero.
fn dijkstra_ball(
    neighbors: &[Vec<(u32, f64)>],
    source: usize,
    radius: f64,
) -> Vec<(usize, f64)> {
    let mut settled: HashMap<u32, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    #[allow(clippy::cast_possible_truncation)]
    let source = source as u32;
    heap.push(State {
        vertex: source,
        distance: 0.0,
    });

    while let Some(State { vertex, distance }) = heap.pop() {
        if settled.contains_key(&vertex) {
            continue;
        }
        settled.insert(vertex, distance);
        for &(next, length) in &neighbors[vertex as usize] {
            let candidate = distance + length;
            if candidate <= radius && !settled.contains_key(&next) {
                heap.push(State {
                    vertex: next,
                    distance: candidate,
                });
            }
        }
    }

    settled
        .into_iter()
        .map(|(vertex, distance)| (vertex as usize, distance))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::error::BrainsurfError;
    use crate::math::stats::{nan_mean, nan_std};
    use crate::surface::{Hemisphere, SurfaceInput};

    fn sphere_surface(seed: u64) -> Surface {
        let mesh = Mesh::icosphere(2);
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<f64> = (0..mesh.n_vertices())
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        let mut inputs = BTreeMap::new();
        inputs.insert(
            Hemisphere::Left,
            SurfaceInput {
                mesh,
                data,
                medial_mask: None,
            },
        );
        Surface::from_inputs(inputs, false).unwrap()
    }

    #[test]
    fn invalid_bandwidth_is_rejected() {
        assert!(matches!(
            GaussianKernelSmoother::new(0.0),
            Err(BrainsurfError::Config(_))
        ));
        assert!(matches!(
            GaussianKernelSmoother::new(f64::NAN),
            Err(BrainsurfError::Config(_))
        ));
    }

    #[test]
    fn smoothing_reduces_dispersion() {
        let x = sphere_surface(1);
        let smoother = GaussianKernelSmoother::new(0.5).unwrap();
        let smoothed = smoother.transform(&x).unwrap();
        let before = x.part(Hemisphere::Left).unwrap().data();
        let after = smoothed.part(Hemisphere::Left).unwrap().data();
        assert_ne!(before, after, "smoothing not applied");
        assert!(nan_std(after) < nan_std(before));
        assert_relative_eq!(nan_mean(after), nan_mean(before), epsilon = 0.05);
    }

    #[test]
    fn constant_input_is_a_fixed_point() {
        let mesh = Mesh::icosphere(2);
        let n = mesh.n_vertices();
        let mut inputs = BTreeMap::new();
        inputs.insert(
            Hemisphere::Left,
            SurfaceInput {
                mesh,
                data: vec![3.5; n],
                medial_mask: None,
            },
        );
        let x = Surface::from_inputs(inputs, false).unwrap();
        let smoother = GaussianKernelSmoother::new(0.5).unwrap();
        let smoothed = smoother.transform(&x).unwrap();
        for &value in smoothed.part(Hemisphere::Left).unwrap().data() {
            assert_relative_eq!(value, 3.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn masked_vertices_stay_nan() {
        let mesh = Mesh::icosphere(2);
        let n = mesh.n_vertices();
        let mask: Vec<bool> = mesh.coordinates().iter().map(|p| p.z >= -0.5).collect();
        let mut rng = StdRng::seed_from_u64(4);
        let data: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let mut inputs = BTreeMap::new();
        inputs.insert(
            Hemisphere::Left,
            SurfaceInput {
                mesh,
                data,
                medial_mask: Some(mask.clone()),
            },
        );
        let x = Surface::from_inputs(inputs, true).unwrap();
        let smoother = GaussianKernelSmoother::new(0.5).unwrap();
        let smoothed = smoother.transform(&x).unwrap();
        for (value, valid) in smoothed.part(Hemisphere::Left).unwrap().data().iter().zip(&mask) {
            assert_eq!(value.is_nan(), !*valid);
        }
    }

    #[test]
    fn heap_state_equality_agrees_with_its_ordering() {
        let near = State {
            vertex: 0,
            distance: 1.0,
        };
        let far = State {
            vertex: 1,
            distance: 2.0,
        };
        let far_twin = State {
            vertex: 2,
            distance: 2.0,
        };

        // Min-heap semantics: the nearer state compares greater.
        assert!(near > far);
        // Equal distances are not equal states; the vertex breaks the tie,
        // consistently between `cmp` and `eq`.
        assert_ne!(far, far_twin);
        assert_eq!(far.cmp(&far_twin), Ordering::Greater);

        let mut heap = BinaryHeap::from([far, near, far_twin]);
        assert_eq!(heap.pop().map(|s| s.vertex), Some(0));
    }

    #[test]
    fn tiny_bandwidth_is_near_identity() {
        // A kernel far narrower than any edge sees only the vertex itself.
        let x = sphere_surface(9);
        let smoother = GaussianKernelSmoother::new(1e-3).unwrap();
        let smoothed = smoother.transform(&x).unwrap();
        let before = x.part(Hemisphere::Left).unwrap().data();
        let after = smoothed.part(Hemisphere::Left).unwrap().data();
        for (b, a) in before.iter().zip(after) {
            assert_relative_eq!(*b, *a, epsilon = 1e-9);
        }
    }
}
