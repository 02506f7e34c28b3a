//! World-space records built from target meshes.

use rcsim_math::{Point3, Transform};
use rcsim_mesh::{GeometricEdge, Mesh};

use crate::{GpuEdge, GpuTriangle};

/// One triangle record per mesh triangle, in mesh order, transformed to world space.
///
/// Keeping the order means a hit's `triangle_id` indexes the source mesh.
/// A triangle referencing a missing vertex becomes a zero-area record at the
/// origin so the ids stay aligned.
pub fn triangles_from_mesh(mesh: &Mesh, transform: &Transform) -> Vec<GpuTriangle> {
    (0..mesh.num_triangles())
        .map(|t| match mesh.triangle_positions(t) {
            Some(corners) => {
                let [p0, p1, p2] = corners.map(|p| transform.apply_point(&p));
                GpuTriangle::new(p0, p1, p2)
            }
            None => {
                let o = Point3::origin();
                GpuTriangle::new(o, o, o)
            }
        })
        .collect()
}

/// World-space records for the crease edges of `edges`.
///
/// Edges pointing outside `mesh` are skipped.
pub fn edge_records(mesh: &Mesh, edges: &[GeometricEdge], transform: &Transform) -> Vec<GpuEdge> {
    edges
        .iter()
        .filter(|e| e.is_crease)
        .filter_map(|e| {
            let a = mesh.position(e.v0)?;
            let b = mesh.position(e.v1)?;
            Some(GpuEdge::new(
                transform.apply_point(&a),
                transform.apply_point(&b),
                e.crease_angle,
                true,
            ))
        })
        .collect()
}
