#![warn(missing_docs)]

//! Math types for the rcsim radar cross-section simulator.
//!
//! Thin wrappers around nalgebra in single precision, matching the
//! float layout the GPU tracer consumes: points, vectors, directions,
//! model transforms, and a host-side bounding box.

mod aabb;

pub use aabb::Aabb;

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f32>>;

/// Cross-product length below which a triangle is treated as degenerate.
pub const DEGENERATE_LENGTH: f32 = 1e-4;

/// Homogeneous model transform applied to target geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Column-major 4x4 matrix, as uploaded to the GPU.
    pub matrix: Matrix4<f32>,
}

impl Transform {
    /// No-op transform.
    pub fn identity() -> Self {
        Self::from(Matrix4::identity())
    }

    /// Move by `(dx, dy, dz)`.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Self::from(Matrix4::new_translation(&Vec3::new(dx, dy, dz)))
    }

    /// Per-axis scale.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from(Matrix4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)))
    }

    /// Turn `angle` radians about +X.
    pub fn rotation_x(angle: f32) -> Self {
        Self::about_axis(Vec3::x_axis(), angle)
    }

    /// Turn `angle` radians about +Y.
    pub fn rotation_y(angle: f32) -> Self {
        Self::about_axis(Vec3::y_axis(), angle)
    }

    /// Turn `angle` radians about +Z.
    pub fn rotation_z(angle: f32) -> Self {
        Self::about_axis(Vec3::z_axis(), angle)
    }

    fn about_axis(axis: Dir3, angle: f32) -> Self {
        Self::from(Rotation3::from_axis_angle(&axis, angle).to_homogeneous())
    }

    /// Target attitude from `(pitch, yaw, roll)` in degrees.
    ///
    /// The product is `Ry(yaw) * Rx(pitch) * Rz(roll)`, so roll acts first.
    pub fn from_euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self::rotation_y(yaw.to_radians())
            .then(&Self::rotation_x(pitch.to_radians()))
            .then(&Self::rotation_z(roll.to_radians()))
    }

    /// Model matrix `T * R * S` from position, Euler degrees, and scale.
    pub fn from_trs(position: &Vec3, euler_degrees: &Vec3, scale: &Vec3) -> Self {
        let rotation =
            Self::from_euler_degrees(euler_degrees.x, euler_degrees.y, euler_degrees.z);
        Self::translation(position.x, position.y, position.z)
            .then(&rotation)
            .then(&Self::scale(scale.x, scale.y, scale.z))
    }

    /// `self * other`: `other` is applied to geometry first.
    pub fn then(&self, other: &Transform) -> Self {
        Self::from(self.matrix * other.matrix)
    }

    /// Map a position.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }

    /// Map a direction; translation has no effect.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.matrix.transform_vector(v)
    }

    /// Map a surface normal with the inverse transpose of the linear part.
    ///
    /// The result is not renormalized.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        match linear.try_inverse() {
            Some(inv) => inv.transpose() * n,
            // Singular transform; leave the normal as given.
            None => *n,
        }
    }

    /// Inverse transform, or `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::from)
    }
}

impl From<Matrix4<f32>> for Transform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Normalized cross product of two triangle edges, or `None` when the
/// triangle is degenerate.
pub fn face_normal(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Vec3> {
    let n = (p1 - p0).cross(&(p2 - p0));
    let len = n.norm();
    if len > DEGENERATE_LENGTH {
        Some(n / len)
    } else {
        None
    }
}
