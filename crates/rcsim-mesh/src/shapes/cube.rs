//! Flat-shaded unit cube centred on the origin.

use rcsim_math::{Point3, Vec3};

use crate::Mesh;

const HALF: f32 = 0.5;

/// Unit cube centred at the origin with flat per-face normals.
///
/// Each face owns its four corners (24 vertices, 12 triangles) so the
/// vertex normals stay flat. Faces are listed as `(normal, u, v)` with
/// `u × v = normal`, which keeps the quads counter-clockwise from outside.
pub fn cube() -> Mesh {
    let faces = [
        (Vec3::x(), Vec3::y(), Vec3::z()),
        (-Vec3::x(), Vec3::z(), Vec3::y()),
        (Vec3::y(), Vec3::z(), Vec3::x()),
        (-Vec3::y(), Vec3::x(), Vec3::z()),
        (Vec3::z(), Vec3::x(), Vec3::y()),
        (-Vec3::z(), Vec3::y(), Vec3::x()),
    ];

    let mut mesh = Mesh::new();
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| Point3::from((n + u * su + v * sv) * HALF);
        let a = mesh.add_vertex(corner(-1.0, -1.0), n);
        let b = mesh.add_vertex(corner(1.0, -1.0), n);
        let c = mesh.add_vertex(corner(1.0, 1.0), n);
        let d = mesh.add_vertex(corner(-1.0, 1.0), n);
        mesh.add_quad(a, b, c, d);
    }
    mesh
}
