pub mod stats;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Dynamically sized column vector.
pub type DVector = nalgebra::DVector<f64>;

/// Dynamically sized dense matrix.
pub type DMatrix = nalgebra::DMatrix<f64>;

/// Global numeric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
