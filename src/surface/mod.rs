use std::collections::BTreeMap;
use std::fmt;

use nalgebra_sparse::CsrMatrix;

use crate::atlas::{Atlas, AtlasLoader};
use crate::error::{Result, ShapeError};
use crate::graph;
use crate::mesh::Mesh;

/// One side of the cortex. Hemispheres are always processed independently
/// and never mixed in adjacency or smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    /// Both hemispheres, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// Construction input for one hemisphere of a [`Surface`].
#[derive(Debug, Clone)]
pub struct SurfaceInput {
    pub mesh: Mesh,
    pub data: Vec<f64>,
    /// `true` = cortical vertex, `false` = medial wall. `None` treats every
    /// vertex as cortical.
    pub medial_mask: Option<Vec<bool>>,
}

/// Geometry, data, and medial-wall mask for one hemisphere.
///
/// Invariant: `data.len() == mesh.n_vertices() == medial_mask.len()`,
/// checked at [`Surface`] construction.
#[derive(Debug, Clone)]
pub struct SurfacePart {
    mesh: Mesh,
    data: Vec<f64>,
    medial_mask: Vec<bool>,
}

impl SurfacePart {
    /// The hemisphere's mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Per-vertex scalar data. Medial-wall vertices hold NaN when masking
    /// was applied, preserving index alignment with the mesh.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Per-vertex validity mask (`true` = cortical vertex).
    #[must_use]
    pub fn medial_mask(&self) -> &[bool] {
        &self.medial_mask
    }

    pub(crate) fn set_data(&mut self, data: Vec<f64>) {
        debug_assert_eq!(data.len(), self.mesh.n_vertices());
        self.data = data;
    }
}

/// A scalar map bound to cortical surface geometry.
///
/// Owns one mesh, one data array, and one medial-wall mask per hemisphere;
/// either hemisphere alone or the full pair is permitted. Transformers treat
/// a `Surface` as immutable and always return a new one.
#[derive(Debug, Clone)]
pub struct Surface {
    parts: BTreeMap<Hemisphere, SurfacePart>,
}

impl Surface {
    /// Builds a surface from per-hemisphere meshes, data, and masks.
    ///
    /// When `mask_medial` is set and an input carries a medial mask, data at
    /// masked-out vertices is overwritten with NaN and the mask is kept for
    /// adjacency construction. Otherwise every vertex is treated as valid.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] naming the hemisphere if a data or mask
    /// length disagrees with its mesh vertex count.
    pub fn from_inputs(
        inputs: BTreeMap<Hemisphere, SurfaceInput>,
        mask_medial: bool,
    ) -> Result<Self> {
        let mut parts = BTreeMap::new();
        for (hemi, input) in inputs {
            let n_vertices = input.mesh.n_vertices();
            if input.data.len() != n_vertices {
                return Err(ShapeError::DataMeshMismatch {
                    hemi,
                    data_len: input.data.len(),
                    n_vertices,
                }
                .into());
            }

            let mut data = input.data;
            let medial_mask = match (mask_medial, input.medial_mask) {
                (true, Some(mask)) => {
                    if mask.len() != n_vertices {
                        return Err(ShapeError::MaskMeshMismatch {
                            hemi,
                            mask_len: mask.len(),
                            n_vertices,
                        }
                        .into());
                    }
                    for (value, &valid) in data.iter_mut().zip(&mask) {
                        if !valid {
                            *value = f64::NAN;
                        }
                    }
                    mask
                }
                _ => vec![true; n_vertices],
            };

            parts.insert(
                hemi,
                SurfacePart {
                    mesh: input.mesh,
                    data,
                    medial_mask,
                },
            );
        }
        Ok(Self { parts })
    }

    /// Builds a surface by resolving geometry through an [`AtlasLoader`].
    ///
    /// `data` maps hemisphere to a per-vertex array; a subset of the
    /// hemisphere pair is permitted and only the named hemispheres are
    /// constructed.
    ///
    /// # Errors
    ///
    /// Returns an atlas error for an unsupported key and a [`ShapeError`]
    /// if a data array disagrees with the fetched mesh.
    pub fn from_atlas(
        data: BTreeMap<Hemisphere, Vec<f64>>,
        loader: &dyn AtlasLoader,
        atlas: Atlas,
        density: &str,
        surface_type: &str,
        mask_medial: bool,
    ) -> Result<Self> {
        let bundle = loader.fetch(atlas, density, surface_type)?;
        let (mesh_left, mesh_right) = (bundle.mesh_left, bundle.mesh_right);
        let (mask_left, mask_right) = (bundle.medial_mask_left, bundle.medial_mask_right);

        let mut inputs = BTreeMap::new();
        for (hemi, values) in data {
            let (mesh, mask) = match hemi {
                Hemisphere::Left => (mesh_left.clone(), mask_left.clone()),
                Hemisphere::Right => (mesh_right.clone(), mask_right.clone()),
            };
            inputs.insert(
                hemi,
                SurfaceInput {
                    mesh,
                    data: values,
                    medial_mask: Some(mask),
                },
            );
        }
        Self::from_inputs(inputs, mask_medial)
    }

    /// Hemispheres present on this surface, in order.
    pub fn hemispheres(&self) -> impl Iterator<Item = Hemisphere> + '_ {
        self.parts.keys().copied()
    }

    /// The part for one hemisphere, if present.
    #[must_use]
    pub fn part(&self, hemi: Hemisphere) -> Option<&SurfacePart> {
        self.parts.get(&hemi)
    }

    /// Iterates over all present hemisphere parts.
    pub fn parts(&self) -> impl Iterator<Item = (Hemisphere, &SurfacePart)> {
        self.parts.iter().map(|(&hemi, part)| (hemi, part))
    }

    pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = (Hemisphere, &mut SurfacePart)> {
        self.parts.iter_mut().map(|(&hemi, part)| (hemi, part))
    }

    /// Builds the sparse vertex adjacency matrix for each hemisphere.
    ///
    /// Medial-wall vertices are excluded from the graph: any edge touching
    /// one is dropped. The result is recomputed on every call; callers that
    /// need it repeatedly should hold on to it themselves.
    ///
    /// # Errors
    ///
    /// Propagates adjacency-construction failures from the graph builder.
    pub fn get_adjacency(&self) -> Result<BTreeMap<Hemisphere, CsrMatrix<f64>>> {
        let mut adjacency = BTreeMap::new();
        for (hemi, part) in &self.parts {
            let matrix = graph::mesh_adjacency(&part.mesh, Some(&part.medial_mask))?;
            adjacency.insert(*hemi, matrix);
        }
        Ok(adjacency)
    }
}
