//! Error types for the rcsim facade.

use rcsim_mesh::MeshError;
use rcsim_raytrace::RecordError;
use thiserror::Error;

/// Errors surfaced by configuration loading, target checks, and hit files.
#[derive(Error, Debug)]
pub enum RcsError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text is not valid TOML for [`SimConfig`](crate::SimConfig).
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A mesh broke its buffer invariants.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// A record buffer could not be decoded.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// A hit file is not valid JSON for [`HitResult`](rcsim_raytrace::HitResult).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A hit file extension other than `.json` or `.bin`.
    #[error("unsupported hit file format: {0:?} (expected .json or .bin)")]
    UnsupportedFormat(String),
}

/// Result type for rcsim operations.
pub type Result<T> = std::result::Result<T, RcsError>;
