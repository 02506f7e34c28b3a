#![warn(missing_docs)]

//! Fixed-layout records exchanged with the rcsim GPU trace engine.
//!
//! The intersection kernel and its BVH live outside this workspace; this
//! crate only defines what crosses the boundary. Every record is
//! `#[repr(C, align(16))]`, made of `f32`/`u32` lanes packed in 16-byte
//! groups, and [`bytemuck::Pod`] so whole slices can be uploaded or read
//! back without conversion.
//!
//! | record | bytes |
//! |---|---|
//! | [`GpuRay`] | 32 |
//! | [`GpuBvhNode`] | 32 |
//! | [`GpuTriangle`] | 48 |
//! | [`HitResult`] | 64 |
//! | [`ReflectionCluster`] | 48 |
//! | [`GpuEdge`] | 32 |

mod codec;
mod hit;
mod records;
mod upload;

pub use codec::{decode_records, encode_records, RecordError};
pub use hit::{HitResult, ReflectionCluster, MISS_DISTANCE};
pub use records::{GpuBvhNode, GpuEdge, GpuRay, GpuTriangle};
pub use upload::{edge_records, triangles_from_mesh};
