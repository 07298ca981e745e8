use thiserror::Error;

use crate::surface::Hemisphere;

/// Top-level error type for the brainsurf crate.
#[derive(Debug, Error)]
pub enum BrainsurfError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Numerical(#[from] NumericalError),

    #[error(transparent)]
    Atlas(#[from] AtlasError),
}

/// Invalid parameter combinations, rejected at call time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} must be positive")]
    NonPositiveParameter { parameter: &'static str, value: f64 },

    #[error("subsample size {requested} exceeds input size {available}")]
    SubsampleTooLarge { requested: usize, available: usize },

    #[error("resampling input is empty")]
    EmptyInput,

    #[error("{hemi} mesh has no edges; nothing to smooth over")]
    EdgelessMesh { hemi: Hemisphere },
}

/// Array lengths that disagree with the mesh they are bound to.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("{hemi} data has {data_len} values but mesh has {n_vertices} vertices")]
    DataMeshMismatch {
        hemi: Hemisphere,
        data_len: usize,
        n_vertices: usize,
    },

    #[error("{hemi} medial mask has {mask_len} entries but mesh has {n_vertices} vertices")]
    MaskMeshMismatch {
        hemi: Hemisphere,
        mask_len: usize,
        n_vertices: usize,
    },

    #[error("validity mask has {mask_len} entries but adjacency is over {n_vertices} vertices")]
    MaskAdjacencyMismatch { mask_len: usize, n_vertices: usize },
}

/// Corrupted input geometry; fatal, not recoverable.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("face {face} references vertex {index}, but the mesh has only {n_vertices} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        n_vertices: usize,
    },
}

/// Degenerate numerics that cannot be resolved by a local policy.
#[derive(Debug, Error)]
pub enum NumericalError {
    #[error("{hemi} eigenmode projection is singular; mesh may be disconnected or degenerate")]
    SingularProjection { hemi: Hemisphere },

    #[error("{hemi} mesh supports only {available} eigenmodes, {requested} requested")]
    TooFewModes {
        hemi: Hemisphere,
        requested: usize,
        available: usize,
    },

    #[error("{hemi} mesh has {n_vertices} vertices; the eigensolve supports at most {limit}")]
    MeshTooLargeForEigensolve {
        hemi: Hemisphere,
        n_vertices: usize,
        limit: usize,
    },
}

/// Failures resolving an atlas key through an [`AtlasLoader`](crate::atlas::AtlasLoader).
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("no {surface_type} surface for atlas {atlas} at density {density}")]
    NotFound {
        atlas: crate::atlas::Atlas,
        density: String,
        surface_type: String,
    },
}

/// Convenience type alias for results using [`BrainsurfError`].
pub type Result<T> = std::result::Result<T, BrainsurfError>;
