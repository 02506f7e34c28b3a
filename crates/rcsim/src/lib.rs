#![warn(missing_docs)]

//! rcsim: radar cross-section simulation core.
//!
//! This crate ties the workspace together. A [`Target`] owns a procedural
//! mesh and its crease edges and places them in the world; its records feed
//! the external GPU tracer, whose [`HitResult`]s run through a
//! [`BounceEffectPipeline`] to build per-bounce intensity histories.
//! [`SimConfig`] loads the whole setup from TOML.
//!
//! # Example
//!
//! ```
//! use rcsim::{SimConfig, TargetShape};
//!
//! let config = SimConfig::from_toml_str(r#"
//!     [target]
//!     shape = "sphere"
//!     subdivisions = 3
//! "#).unwrap();
//!
//! let target = config.build_target();
//! assert_eq!(target.shape(), TargetShape::Sphere);
//! assert_eq!(target.geometry().crease_count(), 0);
//!
//! let triangles = target.world_triangles();
//! assert_eq!(triangles.len(), 1280);
//! ```

mod config;
mod error;
mod hits;
mod target;

pub use config::{BounceConfig, SimConfig, TargetConfig, MAX_SUBDIVISIONS};
pub use error::{RcsError, Result};
pub use hits::read_hit_records;
pub use target::{Target, TargetGeometry};

// Re-export the workspace crates for single-dependency consumers.
pub use rcsim_bounce as bounce;
pub use rcsim_math as math;
pub use rcsim_mesh as mesh;
pub use rcsim_raytrace as raytrace;

pub use rcsim_bounce::{BounceEffect, BounceEffectPipeline, BounceState, RayTraceMode};
pub use rcsim_mesh::{CreaseParams, GeometricEdge, Mesh, ShapeParams, TargetShape};
pub use rcsim_raytrace::{GpuEdge, GpuTriangle, HitResult, ReflectionCluster};
