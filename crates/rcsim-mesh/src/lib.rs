#![warn(missing_docs)]

//! Procedural target meshes and crease-edge detection for rcsim.
//!
//! [`build_mesh`] turns a [`TargetShape`] selector into a closed,
//! outward-wound [`Mesh`] with unit vertex normals. [`detect_edges`]
//! classifies every mesh edge as a structural crease or a smooth seam;
//! creases are what the renderer draws and what the diffraction model
//! treats as scattering edges.
//!
//! ```
//! use rcsim_mesh::{build_mesh, crease_edges, detect_edges, CreaseParams, TargetShape};
//!
//! let cube = build_mesh(TargetShape::Cube, 0);
//! let edges = detect_edges(&cube, &CreaseParams::default());
//! assert_eq!(crease_edges(&edges).len(), 12);
//! ```

mod edges;
mod error;
mod mesh;
pub mod shapes;

pub use edges::{
    crease_edges, crease_line_vertices, detect_edges, CreaseParams, GeometricEdge,
    DEFAULT_COS_THRESHOLD, DEFAULT_WELD_TOLERANCE, DEGENERATE_FACE_NORMAL,
};
pub use error::{MeshError, Result};
pub use mesh::Mesh;
pub use shapes::{
    build_mesh, build_mesh_with, ShapeParams, TargetShape, CYLINDER_SEGMENTS, DEFAULT_SUBDIVISIONS,
};
