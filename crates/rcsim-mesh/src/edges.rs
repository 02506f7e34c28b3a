//! Crease-edge detection.
//!
//! Every undirected mesh edge is classified from the triangles around it:
//!
//! | adjacent triangles | crease | angle |
//! |---|---|---|
//! | 1 (boundary) | yes | π |
//! | 2 | if `n0 · n1 < cos_threshold` | `acos(n0 · n1)` |
//! | 3+ (non-manifold) | yes | 0 |
//!
//! Flat-shaded shapes duplicate vertices per face, so by default vertices
//! are welded by position first; otherwise every face seam would read as a
//! boundary.

use std::collections::{BTreeMap, HashMap};
use std::f32::consts::PI;

use rcsim_math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Mesh;

/// Dot-product threshold between adjacent face normals (≈ cos 10°).
pub const DEFAULT_COS_THRESHOLD: f32 = 0.985;

/// Default grid cell size for welding coincident vertices.
pub const DEFAULT_WELD_TOLERANCE: f32 = 1e-5;

/// Normal used for triangles too small to have one.
pub const DEGENERATE_FACE_NORMAL: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// An undirected mesh edge and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricEdge {
    /// Lower vertex index.
    pub v0: u32,
    /// Higher vertex index.
    pub v1: u32,
    /// Angle between the adjacent face normals, in radians.
    pub crease_angle: f32,
    /// Whether the edge is structural (rendered, diffracting).
    pub is_crease: bool,
}

/// Edge detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreaseParams {
    /// Edges whose face normals have a dot product below this are creases.
    pub cos_threshold: f32,
    /// Weld grid cell size; `<= 0` disables welding.
    pub weld_tolerance: f32,
}

impl Default for CreaseParams {
    fn default() -> Self {
        Self {
            cos_threshold: DEFAULT_COS_THRESHOLD,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
        }
    }
}

/// Classify every edge of `mesh`.
///
/// Adjacency is keyed on welded vertices, but each edge reports the real
/// `(min, max)` index pair from its first adjacent triangle, so `v0`/`v1`
/// always name an edge the mesh contains. Output is sorted by welded key.
pub fn detect_edges(mesh: &Mesh, params: &CreaseParams) -> Vec<GeometricEdge> {
    let remap = weld_map(mesh, params.weld_tolerance);
    let welded = |i: u32| remap.get(i as usize).copied().unwrap_or(i);

    let mut adjacency: BTreeMap<(u32, u32), ((u32, u32), Vec<usize>)> = BTreeMap::new();
    for (t, tri) in mesh.triangles().enumerate() {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let (wa, wb) = (welded(a), welded(b));
            if wa == wb {
                continue;
            }
            adjacency
                .entry((wa.min(wb), wa.max(wb)))
                .or_insert_with(|| ((a.min(b), a.max(b)), Vec::new()))
                .1
                .push(t);
        }
    }

    let edges: Vec<GeometricEdge> = adjacency
        .into_values()
        .map(|((v0, v1), tris)| {
            let (crease_angle, is_crease) = match tris.as_slice() {
                [_] => (PI, true),
                [t0, t1] => {
                    let dot = triangle_normal(mesh, *t0).dot(&triangle_normal(mesh, *t1));
                    (dot.clamp(-1.0, 1.0).acos(), dot < params.cos_threshold)
                }
                _ => (0.0, true),
            };
            GeometricEdge {
                v0,
                v1,
                crease_angle,
                is_crease,
            }
        })
        .collect();

    debug!(
        edges = edges.len(),
        creases = edges.iter().filter(|e| e.is_crease).count(),
        "detected mesh edges"
    );
    edges
}

/// Only the crease edges of `edges`.
pub fn crease_edges(edges: &[GeometricEdge]) -> Vec<GeometricEdge> {
    edges.iter().filter(|e| e.is_crease).copied().collect()
}

/// Line-list buffer `[x0, y0, z0, x1, y1, z1, ...]` of the crease edges.
///
/// Edges referencing vertices outside `mesh` are skipped.
pub fn crease_line_vertices(mesh: &Mesh, edges: &[GeometricEdge]) -> Vec<f32> {
    let mut out = Vec::new();
    for edge in edges.iter().filter(|e| e.is_crease) {
        if let (Some(a), Some(b)) = (mesh.position(edge.v0), mesh.position(edge.v1)) {
            out.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
        }
    }
    out
}

fn triangle_normal(mesh: &Mesh, t: usize) -> Vec3 {
    mesh.face_normal(t).unwrap_or(DEGENERATE_FACE_NORMAL)
}

/// Representative vertex for each vertex; identity when welding is off.
fn weld_map(mesh: &Mesh, tolerance: f32) -> Vec<u32> {
    let n = mesh.num_vertices();
    if tolerance.is_nan() || tolerance <= 0.0 {
        return (0..n as u32).collect();
    }

    let inv = 1.0 / tolerance as f64;
    let mut first: HashMap<(i64, i64, i64), u32> = HashMap::with_capacity(n);
    mesh.positions
        .chunks_exact(3)
        .enumerate()
        .map(|(i, p)| {
            let q = |v: f32| (v as f64 * inv).round() as i64;
            *first.entry((q(p[0]), q(p[1]), q(p[2]))).or_insert(i as u32)
        })
        .collect()
}
