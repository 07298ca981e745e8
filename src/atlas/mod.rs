use std::fmt;
use std::str::FromStr;

use crate::error::{AtlasError, Result};
use crate::mesh::Mesh;

/// Reference atlas families for cortical surface geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Atlas {
    Civet,
    Fsaverage,
    FsLr,
}

impl fmt::Display for Atlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Civet => "civet",
            Self::Fsaverage => "fsaverage",
            Self::FsLr => "fsLR",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Atlas {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "civet" => Ok(Self::Civet),
            "fsaverage" => Ok(Self::Fsaverage),
            "fsLR" => Ok(Self::FsLr),
            other => Err(format!("unknown atlas: {other}")),
        }
    }
}

/// Geometry resolved for one (atlas, density, surface type) key: a mesh and
/// a medial-wall mask per hemisphere (`true` = cortical vertex).
#[derive(Debug, Clone)]
pub struct AtlasBundle {
    pub mesh_left: Mesh,
    pub mesh_right: Mesh,
    pub medial_mask_left: Vec<bool>,
    pub medial_mask_right: Vec<bool>,
}

/// Capability for resolving atlas geometry.
///
/// Fetching, caching, and GIFTI parsing live behind this trait; the core
/// only requires that a given key resolves deterministically and without
/// caller-visible side effects.
pub trait AtlasLoader {
    /// Resolves the geometry for one atlas key.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::NotFound`] for an unsupported
    /// (atlas, density, surface type) combination.
    fn fetch(&self, atlas: Atlas, density: &str, surface_type: &str) -> Result<AtlasBundle>;
}

/// Stand-in loader serving icosphere geometry at fsaverage densities.
///
/// Real deployments plug in a loader backed by neuromaps-style atlas files;
/// this one exists so surfaces can be built in tests and demos without any
/// downloads. Both hemispheres share the same unit sphere, and the medial
/// wall is the polar cap below `z = -0.8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSphereLoader;

impl SyntheticSphereLoader {
    const SURFACE_TYPES: [&'static str; 4] = ["white", "pial", "inflated", "sphere"];

    fn subdivisions(density: &str) -> Option<u32> {
        match density {
            "3k" => Some(4),
            "10k" => Some(5),
            "41k" => Some(6),
            "164k" => Some(7),
            _ => None,
        }
    }
}

impl AtlasLoader for SyntheticSphereLoader {
    fn fetch(&self, atlas: Atlas, density: &str, surface_type: &str) -> Result<AtlasBundle> {
        let not_found = || AtlasError::NotFound {
            atlas,
            density: density.to_owned(),
            surface_type: surface_type.to_owned(),
        };

        if atlas != Atlas::Fsaverage || !Self::SURFACE_TYPES.contains(&surface_type) {
            return Err(not_found().into());
        }
        let subdivisions = Self::subdivisions(density).ok_or_else(not_found)?;

        let mesh = Mesh::icosphere(subdivisions);
        let mask: Vec<bool> = mesh.coordinates().iter().map(|p| p.z >= -0.8).collect();
        Ok(AtlasBundle {
            mesh_left: mesh.clone(),
            mesh_right: mesh,
            medial_mask_left: mask.clone(),
            medial_mask_right: mask,
        })
    }
}
