pub mod atlas;
pub mod error;
pub mod graph;
pub mod math;
pub mod mesh;
pub mod resampling;
pub mod smoothing;
pub mod surface;

pub use error::{BrainsurfError, Result};
