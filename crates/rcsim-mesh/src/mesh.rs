//! Flat vertex/index buffers shared by every target shape.

use rcsim_math::{face_normal, Point3, Vec3};

use crate::error::{MeshError, Result};

/// Triangle mesh in the layout the renderer and tracer upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Flat array of unit vertex normals, same length as `positions`.
    pub normals: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`, CCW from outside.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: Point3, normal: Vec3) -> u32 {
        let idx = self.num_vertices() as u32;
        self.positions
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        idx
    }

    /// Append a triangle by vertex index.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.indices.extend_from_slice(&[v0, v1, v2]);
    }

    /// Append a quad as the two triangles `(v0, v1, v2)` and `(v0, v2, v3)`.
    pub fn add_quad(&mut self, v0: u32, v1: u32, v2: u32, v3: u32) {
        self.add_triangle(v0, v1, v2);
        self.add_triangle(v0, v2, v3);
    }

    /// Position of vertex `i`, or `None` if out of range.
    pub fn position(&self, i: u32) -> Option<Point3> {
        let o = i as usize * 3;
        self.positions
            .get(o..o + 3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }

    /// Normal of vertex `i`, or `None` if out of range.
    pub fn normal(&self, i: u32) -> Option<Vec3> {
        let o = i as usize * 3;
        self.normals
            .get(o..o + 3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
    }

    /// Vertex indices of triangle `t`, or `None` past the last triangle.
    pub fn triangle(&self, t: usize) -> Option<[u32; 3]> {
        let c = self.indices.get(t.checked_mul(3)?..)?.get(..3)?;
        Some([c[0], c[1], c[2]])
    }

    /// Iterate over all triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Corner positions of triangle `t`, or `None` if the triangle or one of
    /// its vertices does not exist.
    pub fn triangle_positions(&self, t: usize) -> Option<[Point3; 3]> {
        let [a, b, c] = self.triangle(t)?;
        Some([self.position(a)?, self.position(b)?, self.position(c)?])
    }

    /// Outward face normal of triangle `t` from its winding.
    ///
    /// `None` if the triangle is degenerate or `t` is out of range, as a
    /// stale tracer triangle id can be.
    pub fn face_normal(&self, t: usize) -> Option<Vec3> {
        let [p0, p1, p2] = self.triangle_positions(t)?;
        face_normal(&p0, &p1, &p2)
    }

    /// Average of all vertex positions.
    pub fn centroid(&self) -> Point3 {
        let n = self.num_vertices();
        if n == 0 {
            return Point3::origin();
        }
        let sum = self
            .positions
            .chunks_exact(3)
            .fold(Vec3::zeros(), |acc, p| acc + Vec3::new(p[0], p[1], p[2]));
        Point3::from(sum / n as f32)
    }

    /// Signed enclosed volume; positive for a closed, outward-wound mesh.
    pub fn signed_volume(&self) -> f32 {
        (0..self.num_triangles())
            .filter_map(|t| self.triangle_positions(t))
            .map(|[p0, p1, p2]| p0.coords.dot(&p1.coords.cross(&p2.coords)) / 6.0)
            .sum()
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.num_vertices() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Interleaved `[x, y, z, nx, ny, nz]` vertex buffer for rendering.
    pub fn interleaved(&self) -> Vec<f32> {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .flat_map(|(p, n)| [p[0], p[1], p[2], n[0], n[1], n[2]])
            .collect()
    }

    /// Check the buffer invariants.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::RaggedBuffer(format!(
                "{} position floats",
                self.positions.len()
            )));
        }
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::RaggedBuffer(format!(
                "{} normal floats for {} position floats",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedBuffer(format!(
                "{} indices",
                self.indices.len()
            )));
        }
        let vertex_count = self.num_vertices();
        for (t, tri) in self.triangles().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle: t,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
