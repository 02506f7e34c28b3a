//! Target shape selection and the mesh builders behind it.

mod aircraft;
mod cube;
mod cylinder;
mod geodesic;

pub use aircraft::aircraft;
pub use cube::cube;
pub use cylinder::cylinder;
pub use geodesic::geodesic_sphere;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Mesh;

/// Default number of side segments around the cylinder.
pub const CYLINDER_SEGMENTS: u32 = 24;

/// Canonical target geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetShape {
    /// Unit cube centred at the origin.
    #[default]
    Cube,
    /// Unit-height cylinder along +Z.
    Cylinder,
    /// Simplified fighter silhouette, nose along +X.
    Aircraft,
    /// Geodesic sphere from a subdivided icosahedron.
    Sphere,
}

impl TargetShape {
    /// All shapes in selector-index order.
    pub const ALL: [TargetShape; 4] = [
        TargetShape::Cube,
        TargetShape::Cylinder,
        TargetShape::Aircraft,
        TargetShape::Sphere,
    ];

    /// Map a numeric selector to a shape. Unknown values select [`TargetShape::Cube`].
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => TargetShape::Cube,
            1 => TargetShape::Cylinder,
            2 => TargetShape::Aircraft,
            3 => TargetShape::Sphere,
            other => {
                warn!(index = other, "unknown target shape index, using cube");
                TargetShape::Cube
            }
        }
    }

    /// Map a shape name (case-insensitive) to a shape. Unknown names select
    /// [`TargetShape::Cube`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cube" => TargetShape::Cube,
            "cylinder" => TargetShape::Cylinder,
            "aircraft" => TargetShape::Aircraft,
            "sphere" => TargetShape::Sphere,
            _ => {
                warn!(shape = name, "unknown target shape name, using cube");
                TargetShape::Cube
            }
        }
    }

    /// Numeric selector of this shape.
    pub fn index(self) -> i64 {
        match self {
            TargetShape::Cube => 0,
            TargetShape::Cylinder => 1,
            TargetShape::Aircraft => 2,
            TargetShape::Sphere => 3,
        }
    }

    /// Lowercase shape name.
    pub fn name(self) -> &'static str {
        match self {
            TargetShape::Cube => "cube",
            TargetShape::Cylinder => "cylinder",
            TargetShape::Aircraft => "aircraft",
            TargetShape::Sphere => "sphere",
        }
    }
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for TargetShape {
    fn from(name: String) -> Self {
        TargetShape::from_name(&name)
    }
}

impl From<TargetShape> for String {
    fn from(shape: TargetShape) -> Self {
        shape.name().to_string()
    }
}

/// Default geodesic subdivision level.
pub const DEFAULT_SUBDIVISIONS: i32 = 3;

/// Tessellation knobs for the parametric shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// Geodesic sphere subdivision level.
    pub subdivisions: i32,
    /// Side segments around the cylinder.
    pub cylinder_segments: u32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            subdivisions: DEFAULT_SUBDIVISIONS,
            cylinder_segments: CYLINDER_SEGMENTS,
        }
    }
}

/// Build the mesh for `shape`. `subdivisions` only affects the sphere.
pub fn build_mesh(shape: TargetShape, subdivisions: i32) -> Mesh {
    build_mesh_with(
        shape,
        &ShapeParams {
            subdivisions,
            cylinder_segments: CYLINDER_SEGMENTS,
        },
    )
}

/// Build the mesh for `shape` with explicit tessellation parameters.
pub fn build_mesh_with(shape: TargetShape, params: &ShapeParams) -> Mesh {
    let mesh = match shape {
        TargetShape::Cube => cube(),
        TargetShape::Cylinder => cylinder(params.cylinder_segments),
        TargetShape::Aircraft => aircraft(),
        TargetShape::Sphere => geodesic_sphere(params.subdivisions),
    };
    debug!(
        %shape,
        subdivisions = params.subdivisions,
        vertices = mesh.num_vertices(),
        triangles = mesh.num_triangles(),
        "built target mesh"
    );
    mesh
}

/// Shared checks for the shape builders.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use rcsim_math::Point3;

    use crate::Mesh;

    /// Quantized position key, so per-face duplicate vertices count as one.
    fn key(p: &Point3) -> (i64, i64, i64) {
        let q = |v: f32| (v as f64 * 1e5).round() as i64;
        (q(p.x), q(p.y), q(p.z))
    }

    /// Every geometric edge is shared by exactly two triangles.
    pub fn assert_closed(mesh: &Mesh) {
        let mut counts: BTreeMap<_, usize> = BTreeMap::new();
        for tri in mesh.triangles() {
            let keys = tri.map(|i| key(&mesh.position(i).unwrap()));
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let (lo, hi) = if keys[a] < keys[b] {
                    (keys[a], keys[b])
                } else {
                    (keys[b], keys[a])
                };
                *counts.entry((lo, hi)).or_default() += 1;
            }
        }
        for (edge, count) in counts {
            assert_eq!(count, 2, "edge {edge:?} has {count} triangles");
        }
    }

    /// Every vertex normal has unit length.
    pub fn assert_unit_normals(mesh: &Mesh) {
        for i in 0..mesh.num_vertices() as u32 {
            let n = mesh.normal(i).unwrap();
            assert!((n.norm() - 1.0).abs() < 1e-5, "vertex {i} normal {n:?}");
        }
    }

    /// Every face normal points away from `interior`.
    pub fn assert_outward_from(mesh: &Mesh, interior: &Point3) {
        for t in 0..mesh.num_triangles() {
            let [p0, p1, p2] = mesh.triangle_positions(t).unwrap();
            let n = mesh.face_normal(t).unwrap();
            let c = (p0.coords + p1.coords + p2.coords) / 3.0;
            assert!(
                n.dot(&(c - interior.coords)) > 0.0,
                "triangle {t} faces inward"
            );
        }
    }
}
