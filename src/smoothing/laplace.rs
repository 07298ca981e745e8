//! Laplace-Beltrami eigenmodes of a triangulated surface.
//!
//! Assembles the cotangent-weight stiffness matrix and lumped vertex mass of
//! the mesh, then solves the generalized symmetric eigenproblem
//! `A v = lambda M v` by symmetrizing with `M^{-1/2}` and handing the dense
//! operator to nalgebra's symmetric eigendecomposition. Assembly is sparse;
//! only the eigensolve densifies, which caps the supported mesh size at
//! [`MAX_EIGENSOLVE_VERTICES`].

use nalgebra::linalg::SymmetricEigen;
use nalgebra_sparse::CooMatrix;

use crate::error::{ConfigError, NumericalError, Result};
use crate::math::{DMatrix, DVector, TOLERANCE};
use crate::mesh::Mesh;
use crate::surface::Hemisphere;

/// The smallest eigenpairs of a mesh's Laplace-Beltrami operator.
///
/// Eigenvalues are sorted ascending; `eigenmodes` holds one mode per column,
/// mass-orthonormal over the mesh. The first pair is the constant mode with
/// eigenvalue zero.
#[derive(Debug, Clone)]
pub struct EigenBasis {
    pub eigenvalues: DVector,
    pub eigenmodes: DMatrix,
}

/// Largest vertex count accepted by the eigensolve. The symmetrized operator
/// is an `n x n` dense matrix, so memory grows quadratically: 3k-density
/// meshes (2562 vertices, ~50 MB) sit comfortably under this bound, while a
/// 10k mesh would already need ~840 MB and beyond. Higher densities would
/// need a sparse iterative eigensolver.
pub const MAX_EIGENSOLVE_VERTICES: usize = 4096;

/// Computes the `n_pairs` smallest Laplace-Beltrami eigenpairs of `mesh`.
///
/// `hemi` only labels errors. Degenerate (zero-area) triangles contribute
/// nothing; a vertex left without any incident area is given the smallest
/// positive vertex mass so the mass matrix stays invertible.
///
/// # Errors
///
/// Returns [`ConfigError::EdgelessMesh`] for a mesh with no faces,
/// [`NumericalError::TooFewModes`] when `n_pairs` exceeds the vertex count,
/// and [`NumericalError::MeshTooLargeForEigensolve`] when the mesh exceeds
/// [`MAX_EIGENSOLVE_VERTICES`].
pub fn eigenbasis(mesh: &Mesh, n_pairs: usize, hemi: Hemisphere) -> Result<EigenBasis> {
    let n = mesh.n_vertices();
    if mesh.faces().is_empty() {
        return Err(ConfigError::EdgelessMesh { hemi }.into());
    }
    if n > MAX_EIGENSOLVE_VERTICES {
        return Err(NumericalError::MeshTooLargeForEigensolve {
            hemi,
            n_vertices: n,
            limit: MAX_EIGENSOLVE_VERTICES,
        }
        .into());
    }
    if n_pairs > n {
        return Err(NumericalError::TooFewModes {
            hemi,
            requested: n_pairs,
            available: n,
        }
        .into());
    }

    let (stiffness, mass) = assemble(mesh);

    // Smallest positive mass backstops isolated vertices.
    let floor = mass
        .iter()
        .copied()
        .filter(|&m| m > 0.0)
        .fold(f64::INFINITY, f64::min);
    let floor = if floor.is_finite() { floor } else { 1.0 };
    let inv_sqrt_mass: Vec<f64> = mass
        .iter()
        .map(|&m| 1.0 / if m > 0.0 { m.sqrt() } else { floor.sqrt() })
        .collect();

    // Symmetrized operator C = M^{-1/2} A M^{-1/2}, densified for the solve.
    let mut operator = DMatrix::zeros(n, n);
    for (i, j, value) in stiffness.triplet_iter() {
        operator[(i, j)] += value * inv_sqrt_mass[i] * inv_sqrt_mass[j];
    }

    let eigen = SymmetricEigen::new(operator);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[a]
            .partial_cmp(&eigen.eigenvalues[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut eigenvalues = DVector::zeros(n_pairs);
    let mut eigenmodes = DMatrix::zeros(n, n_pairs);
    for (k, &idx) in order.iter().take(n_pairs).enumerate() {
        // Small negative eigenvalues are discretization noise on a PSD
        // operator.
        eigenvalues[k] = eigen.eigenvalues[idx].max(0.0);
        for i in 0..n {
            eigenmodes[(i, k)] = eigen.eigenvectors[(i, idx)] * inv_sqrt_mass[i];
        }
    }

    Ok(EigenBasis {
        eigenvalues,
        eigenmodes,
    })
}

/// Cotangent stiffness matrix and lumped (Voronoi-thirds) vertex mass.
fn assemble(mesh: &Mesh) -> (CooMatrix<f64>, Vec<f64>) {
    let n = mesh.n_vertices();
    let coordinates = mesh.coordinates();
    let mut stiffness = CooMatrix::new(n, n);
    let mut mass = vec![0.0; n];

    for &[a, b, c] in mesh.faces() {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let pa = &coordinates[a];
        let pb = &coordinates[b];
        let pc = &coordinates[c];

        let double_area = (pb - pa).cross(&(pc - pa)).norm();
        if double_area < TOLERANCE {
            continue;
        }

        let area = double_area / 2.0;
        for &vertex in &[a, b, c] {
            mass[vertex] += area / 3.0;
        }

        // Half-cotangent of the angle at each corner weights the opposite
        // edge. The cross-product norm at any corner equals twice the
        // triangle area.
        for (corner, i, j) in [(a, b, c), (b, c, a), (c, a, b)] {
            let u = coordinates[i] - coordinates[corner];
            let v = coordinates[j] - coordinates[corner];
            let half_cot = 0.5 * u.dot(&v) / double_area;
            stiffness.push(i, j, -half_cot);
            stiffness.push(j, i, -half_cot);
            stiffness.push(i, i, half_cot);
            stiffness.push(j, j, half_cot);
        }
    }

    (stiffness, mass)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::BrainsurfError;

    #[test]
    fn first_eigenvalue_is_zero_with_constant_mode() {
        let mesh = Mesh::icosphere(2);
        let basis = eigenbasis(&mesh, 10, Hemisphere::Left).unwrap();

        assert_relative_eq!(basis.eigenvalues[0], 0.0, epsilon = 1e-8);
        // Constant mode: all entries equal up to sign.
        let column = basis.eigenmodes.column(0);
        let first = column[0];
        for &value in column.iter() {
            assert_relative_eq!(value, first, epsilon = 1e-6);
        }
    }

    #[test]
    fn eigenvalues_are_sorted_and_nonnegative() {
        let mesh = Mesh::icosphere(2);
        let basis = eigenbasis(&mesh, 20, Hemisphere::Left).unwrap();
        for k in 1..20 {
            assert!(basis.eigenvalues[k] >= basis.eigenvalues[k - 1]);
        }
        assert!(basis.eigenvalues[1] > 1e-6, "spectral gap missing");
    }

    #[test]
    fn sphere_spectrum_matches_analytic_multiplicity() {
        // On the unit sphere the Laplace-Beltrami eigenvalues are
        // l * (l + 1), each with multiplicity 2l + 1: after the constant
        // mode comes a triplet near 2.
        let mesh = Mesh::icosphere(3);
        let basis = eigenbasis(&mesh, 4, Hemisphere::Left).unwrap();
        for k in 1..4 {
            assert_relative_eq!(basis.eigenvalues[k], 2.0, epsilon = 0.1);
        }
    }

    #[test]
    fn oversized_mesh_is_rejected_before_the_dense_solve() {
        // 10242 vertices; the dense operator alone would need ~840 MB.
        let mesh = Mesh::icosphere(5);
        let result = eigenbasis(&mesh, 10, Hemisphere::Left);
        assert!(matches!(
            result,
            Err(BrainsurfError::Numerical(
                NumericalError::MeshTooLargeForEigensolve { .. }
            ))
        ));
    }

    #[test]
    fn requesting_more_pairs_than_vertices_fails() {
        let mesh = Mesh::icosphere(0);
        let result = eigenbasis(&mesh, 13, Hemisphere::Right);
        assert!(result.is_err());
    }

    #[test]
    fn faceless_mesh_is_a_configuration_error() {
        let mesh = Mesh::new(vec![crate::math::Point3::new(0.0, 0.0, 0.0)], vec![]).unwrap();
        let result = eigenbasis(&mesh, 1, Hemisphere::Left);
        assert!(result.is_err());
    }
}
