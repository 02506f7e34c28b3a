//! A placed target: shape, transform, and the geometry built from them.

use rcsim_math::{Aabb, Transform, Vec3};
use rcsim_mesh::{
    build_mesh_with, crease_line_vertices, detect_edges, CreaseParams, GeometricEdge, Mesh,
    ShapeParams, TargetShape,
};
use rcsim_raytrace::{edge_records, triangles_from_mesh, GpuEdge, GpuTriangle};
use tracing::debug;

use crate::error::Result;

/// A mesh together with the edges detected on it.
///
/// The two are only ever built together, so the edge indices always refer
/// to this mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetGeometry {
    mesh: Mesh,
    edges: Vec<GeometricEdge>,
}

impl TargetGeometry {
    /// Build the mesh for `shape` and classify its edges.
    pub fn build(shape: TargetShape, shape_params: &ShapeParams, crease: &CreaseParams) -> Self {
        let mesh = build_mesh_with(shape, shape_params);
        let edges = detect_edges(&mesh, crease);
        Self { mesh, edges }
    }

    /// Triangle mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Every classified edge.
    pub fn edges(&self) -> &[GeometricEdge] {
        &self.edges
    }

    /// Number of crease edges.
    pub fn crease_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_crease).count()
    }

    /// Check the mesh buffers before handing them to the tracer or renderer.
    pub fn validate(&self) -> Result<()> {
        self.mesh.validate()?;
        Ok(())
    }
}

/// A radar target in the scene.
///
/// Changing the shape or tessellation rebuilds the geometry wholesale;
/// moving, rotating, or scaling only changes the model matrix.
#[derive(Debug, Clone)]
pub struct Target {
    shape: TargetShape,
    shape_params: ShapeParams,
    crease: CreaseParams,
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    geometry: TargetGeometry,
}

impl Target {
    /// Target of `shape` with default tessellation and edge parameters,
    /// at the origin.
    pub fn new(shape: TargetShape) -> Self {
        Self::with_params(shape, ShapeParams::default(), CreaseParams::default())
    }

    /// Target with explicit tessellation and edge parameters.
    pub fn with_params(shape: TargetShape, shape_params: ShapeParams, crease: CreaseParams) -> Self {
        let geometry = TargetGeometry::build(shape, &shape_params, &crease);
        Self {
            shape,
            shape_params,
            crease,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            geometry,
        }
    }

    fn rebuild(&mut self) {
        self.geometry = TargetGeometry::build(self.shape, &self.shape_params, &self.crease);
        debug!(
            shape = %self.shape,
            vertices = self.geometry.mesh.num_vertices(),
            triangles = self.geometry.mesh.num_triangles(),
            creases = self.geometry.crease_count(),
            "rebuilt target geometry"
        );
    }

    /// Current shape.
    pub fn shape(&self) -> TargetShape {
        self.shape
    }

    /// Change shape and rebuild.
    pub fn set_shape(&mut self, shape: TargetShape) {
        self.shape = shape;
        self.rebuild();
    }

    /// Geodesic subdivision level.
    pub fn subdivisions(&self) -> i32 {
        self.shape_params.subdivisions
    }

    /// Change the subdivision level; rebuilds only if it differs.
    pub fn set_subdivisions(&mut self, level: i32) {
        if level != self.shape_params.subdivisions {
            self.shape_params.subdivisions = level;
            self.rebuild();
        }
    }

    /// Tessellation parameters.
    pub fn shape_params(&self) -> &ShapeParams {
        &self.shape_params
    }

    /// Edge detection parameters.
    pub fn crease_params(&self) -> &CreaseParams {
        &self.crease
    }

    /// Change edge detection parameters and rebuild.
    pub fn set_crease_params(&mut self, crease: CreaseParams) {
        self.crease = crease;
        self.rebuild();
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the target.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Euler rotation in degrees as `(pitch, yaw, roll)`.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Rotate the target; angles in degrees as `(pitch, yaw, roll)`.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Per-axis scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Scale the target per axis.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Model matrix `T * Ry(yaw) * Rx(pitch) * Rz(roll) * S`.
    pub fn model_matrix(&self) -> Transform {
        Transform::from_trs(&self.position, &self.rotation, &self.scale)
    }

    /// Mesh and edges.
    pub fn geometry(&self) -> &TargetGeometry {
        &self.geometry
    }

    /// Local-space mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.geometry.mesh
    }

    /// Every classified edge.
    pub fn edges(&self) -> &[GeometricEdge] {
        &self.geometry.edges
    }

    /// Local-space line list of the crease edges for the renderer.
    pub fn crease_lines(&self) -> Vec<f32> {
        crease_line_vertices(&self.geometry.mesh, &self.geometry.edges)
    }

    /// World-space triangles in mesh order, ready for the BVH builder.
    pub fn world_triangles(&self) -> Vec<GpuTriangle> {
        triangles_from_mesh(&self.geometry.mesh, &self.model_matrix())
    }

    /// World-space bounding box.
    pub fn world_bounds(&self) -> Aabb {
        let model = self.model_matrix();
        let mesh = &self.geometry.mesh;
        let mut bounds = Aabb::empty();
        for i in 0..mesh.num_vertices() as u32 {
            if let Some(p) = mesh.position(i) {
                bounds.expand_point(&model.apply_point(&p));
            }
        }
        bounds
    }

    /// World-space crease edges for the diffraction pass.
    pub fn diffraction_edges(&self) -> Vec<GpuEdge> {
        edge_records(&self.geometry.mesh, &self.geometry.edges, &self.model_matrix())
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(TargetShape::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rcsim_math::Point3;
    use rcsim_mesh::MeshError;

    #[test]
    fn test_default_target_is_cube() {
        let target = Target::default();
        assert_eq!(target.shape(), TargetShape::Cube);
        assert_eq!(target.mesh().num_triangles(), 12);
        assert_eq!(target.geometry().crease_count(), 12);
    }

    #[test]
    fn test_set_shape_rebuilds_geometry() {
        let mut target = Target::default();
        target.set_shape(TargetShape::Sphere);
        assert_eq!(target.mesh().num_triangles(), 20 * 4usize.pow(3));
        assert_eq!(target.geometry().crease_count(), 0);
    }

    #[test]
    fn test_set_subdivisions() {
        let mut target = Target::new(TargetShape::Sphere);
        target.set_subdivisions(0);
        assert_eq!(target.mesh().num_vertices(), 12);
        assert_eq!(target.geometry().crease_count(), 30);

        let before = target.geometry().clone();
        target.set_subdivisions(0);
        assert_eq!(target.geometry(), &before);
    }

    #[test]
    fn test_edges_track_mesh() {
        let mut target = Target::new(TargetShape::Aircraft);
        target.set_shape(TargetShape::Cylinder);
        let n = target.mesh().num_vertices() as u32;
        assert!(target.edges().iter().all(|e| e.v1 < n));
    }

    #[test]
    fn test_transform_does_not_rebuild() {
        let mut target = Target::default();
        let before = target.geometry().clone();
        target.set_position(Vec3::new(1.0, 2.0, 3.0));
        target.set_rotation(Vec3::new(10.0, 20.0, 30.0));
        target.set_scale(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(target.geometry(), &before);
    }

    #[test]
    fn test_world_bounds() {
        let mut target = Target::default();
        target.set_position(Vec3::new(10.0, 0.0, 0.0));
        target.set_scale(Vec3::new(2.0, 1.0, 1.0));
        let bounds = target.world_bounds();
        assert_abs_diff_eq!(bounds.min, Point3::new(9.0, -0.5, -0.5), epsilon = 1e-5);
        assert_abs_diff_eq!(bounds.max, Point3::new(11.0, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_rotates_nose() {
        let mut target = Target::new(TargetShape::Aircraft);
        target.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        let bounds = target.world_bounds();
        // Yaw about Y swings the +X nose to -Z.
        assert_abs_diff_eq!(bounds.min.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_world_records() {
        let mut target = Target::default();
        target.set_position(Vec3::new(0.0, 0.0, 5.0));
        let tris = target.world_triangles();
        assert_eq!(tris.len(), 12);
        assert!(tris.iter().all(|t| t.vertices().iter().all(|p| p.z >= 4.5 - 1e-5)));

        let edges = target.diffraction_edges();
        assert_eq!(edges.len(), 12);
        assert_eq!(target.crease_lines().len(), 12 * 6);
    }

    #[test]
    fn test_built_geometry_validates() {
        for shape in TargetShape::ALL {
            assert!(Target::new(shape).geometry().validate().is_ok(), "{shape}");
        }
    }

    #[test]
    fn test_broken_geometry_is_mesh_error() {
        let mut geometry = Target::default().geometry().clone();
        geometry.mesh.indices.push(999);
        let err = geometry.validate().unwrap_err();
        assert!(matches!(err, crate::RcsError::Mesh(MeshError::RaggedBuffer(_))));

        geometry.mesh.indices.extend_from_slice(&[0, 999]);
        let err = geometry.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::RcsError::Mesh(MeshError::IndexOutOfRange { index: 999, .. })
        ));
    }
}
