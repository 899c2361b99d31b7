//! Error types for pz3d

use thiserror::Error;

/// Main error type for pz3d operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Normalizing a vector whose length is zero or not finite
    #[error("cannot normalize a degenerate vector")]
    DegenerateVector,

    /// An operation that needs at least one element got none
    #[error("expected at least one input element")]
    EmptyInput,

    #[error("object has {vertices} vertices but {normals} normals")]
    NormalCountMismatch { vertices: usize, normals: usize },

    #[error("vertex count {vertices} is not a multiple of 3")]
    IncompleteTriangle { vertices: usize },

    #[error("shader error: {0}")]
    Shader(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("STL error: {0}")]
    Stl(String),
}

/// Result type alias for pz3d operations
pub type Result<T> = std::result::Result<T, Error>;
