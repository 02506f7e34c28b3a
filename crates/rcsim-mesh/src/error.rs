//! Error types for mesh validation.

use thiserror::Error;

/// Violations of the mesh buffer invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle index.
        triangle: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A flat buffer length is not a multiple of 3, or positions and normals disagree.
    #[error("ragged buffer: {0}")]
    RaggedBuffer(String),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
