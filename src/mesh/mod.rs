mod icosphere;

use crate::error::{GeometryError, Result};
use crate::math::Point3;

/// A triangulated surface mesh for one hemisphere.
///
/// Owns vertex coordinates and triangular faces. Construction validates that
/// every face index refers to an existing vertex; a violation is corrupted
/// input geometry and is rejected outright.
#[derive(Debug, Clone)]
pub struct Mesh {
    coordinates: Vec<Point3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from vertex coordinates and triangular faces.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::FaceIndexOutOfRange`] if any face references
    /// a vertex index outside `0..coordinates.len()`.
    pub fn new(coordinates: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let n_vertices = coordinates.len();
        for (face, indices) in faces.iter().enumerate() {
            for &index in indices {
                if index as usize >= n_vertices {
                    return Err(GeometryError::FaceIndexOutOfRange {
                        face,
                        index,
                        n_vertices,
                    }
                    .into());
                }
            }
        }
        Ok(Self { coordinates, faces })
    }

    /// Number of vertices.
    #[must_use]
    pub fn n_vertices(&self) -> usize {
        self.coordinates.len()
    }

    /// Vertex coordinates.
    #[must_use]
    pub fn coordinates(&self) -> &[Point3] {
        &self.coordinates
    }

    /// Triangular faces as vertex index triples.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Unit sphere tessellation with `10 * 4^subdivisions + 2` vertices.
    ///
    /// Subdivision level 4 yields the 2562-vertex density of a 3k
    /// fsaverage hemisphere, which makes this the stand-in geometry for
    /// atlas meshes in tests and demos.
    #[must_use]
    pub fn icosphere(subdivisions: u32) -> Self {
        icosphere::build(subdivisions)
    }
}
