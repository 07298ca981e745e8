//! Sparse vertex adjacency from triangulated geometry.
//!
//! Cortical meshes run up to 164k vertices per hemisphere, so the adjacency
//! is accumulated as coordinate triplets and converted to CSR; a dense
//! `n_vertices x n_vertices` matrix is never allocated.

use std::collections::HashSet;

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::error::{GeometryError, Result, ShapeError};
use crate::mesh::Mesh;

/// Builds the symmetric vertex adjacency matrix of a triangulated mesh.
///
/// The three edges of every face are canonicalized (sorted endpoint pair) and
/// deduplicated, so an edge shared by two triangles contributes once. Each
/// surviving edge is emitted in both directions with unit weight; the
/// diagonal is always zero.
///
/// When `mask` is supplied, an edge is kept only if *both* endpoints are
/// valid. An edge between a valid and a masked vertex is dropped too, so
/// smoothing never pulls information out of the excluded region.
///
/// # Errors
///
/// Returns [`GeometryError::FaceIndexOutOfRange`] for a face index at or
/// beyond `n_vertices`, and [`ShapeError::MaskAdjacencyMismatch`] when the
/// mask length disagrees with `n_vertices`.
pub fn vertex_adjacency(
    n_vertices: usize,
    faces: &[[u32; 3]],
    mask: Option<&[bool]>,
) -> Result<CsrMatrix<f64>> {
    if let Some(mask) = mask {
        if mask.len() != n_vertices {
            return Err(ShapeError::MaskAdjacencyMismatch {
                mask_len: mask.len(),
                n_vertices,
            }
            .into());
        }
    }

    let mut edges: HashSet<(u32, u32)> = HashSet::new();
    for (face, &[a, b, c]) in faces.iter().enumerate() {
        for index in [a, b, c] {
            if index as usize >= n_vertices {
                return Err(GeometryError::FaceIndexOutOfRange {
                    face,
                    index,
                    n_vertices,
                }
                .into());
            }
        }
        for (i, j) in [(a, b), (a, c), (b, c)] {
            edges.insert(if i < j { (i, j) } else { (j, i) });
        }
    }

    let mut coo = CooMatrix::new(n_vertices, n_vertices);
    for &(i, j) in &edges {
        if let Some(mask) = mask {
            if !mask[i as usize] || !mask[j as usize] {
                continue;
            }
        }
        coo.push(i as usize, j as usize, 1.0);
        coo.push(j as usize, i as usize, 1.0);
    }

    Ok(CsrMatrix::from(&coo))
}

/// Convenience wrapper taking a validated [`Mesh`].
///
/// # Errors
///
/// Same conditions as [`vertex_adjacency`]; the face-index case cannot occur
/// for a mesh that passed construction.
pub fn mesh_adjacency(mesh: &Mesh, mask: Option<&[bool]>) -> Result<CsrMatrix<f64>> {
    vertex_adjacency(mesh.n_vertices(), mesh.faces(), mask)
}
