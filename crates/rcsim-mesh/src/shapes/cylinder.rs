//! Capped cylinder along +Z with radial side normals.

use std::f32::consts::TAU;

use rcsim_math::{Point3, Vec3};

use crate::Mesh;

const RADIUS: f32 = 0.5;
const HALF_HEIGHT: f32 = 0.5;

/// Cylinder of radius 0.5 and height 1 centred on the origin, axis +Z.
///
/// Caps are triangle fans with flat `±Z` normals; the side wall gets its own
/// ring vertices with radial normals. `segments` is clamped to at least 3.
pub fn cylinder(segments: u32) -> Mesh {
    let n = segments.max(3);
    let ring = |i: u32| {
        let theta = TAU * (i % n) as f32 / n as f32;
        let (s, c) = theta.sin_cos();
        (Vec3::new(c, s, 0.0), Point3::new(RADIUS * c, RADIUS * s, 0.0))
    };
    let at_height = |p: Point3, z: f32| Point3::new(p.x, p.y, z);

    let mut mesh = Mesh::new();

    let top_center = mesh.add_vertex(Point3::new(0.0, 0.0, HALF_HEIGHT), Vec3::z());
    let top_rim = mesh.num_vertices() as u32;
    for i in 0..n {
        let (_, p) = ring(i);
        mesh.add_vertex(at_height(p, HALF_HEIGHT), Vec3::z());
    }
    for i in 0..n {
        mesh.add_triangle(top_center, top_rim + i, top_rim + (i + 1) % n);
    }

    let bottom_center = mesh.add_vertex(Point3::new(0.0, 0.0, -HALF_HEIGHT), -Vec3::z());
    let bottom_rim = mesh.num_vertices() as u32;
    for i in 0..n {
        let (_, p) = ring(i);
        mesh.add_vertex(at_height(p, -HALF_HEIGHT), -Vec3::z());
    }
    for i in 0..n {
        mesh.add_triangle(bottom_center, bottom_rim + (i + 1) % n, bottom_rim + i);
    }

    let side_top = mesh.num_vertices() as u32;
    for i in 0..n {
        let (normal, p) = ring(i);
        mesh.add_vertex(at_height(p, HALF_HEIGHT), normal);
    }
    let side_bottom = mesh.num_vertices() as u32;
    for i in 0..n {
        let (normal, p) = ring(i);
        mesh.add_vertex(at_height(p, -HALF_HEIGHT), normal);
    }
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_quad(side_bottom + i, side_bottom + j, side_top + j, side_top + i);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_closed, assert_outward_from, assert_unit_normals};
    use crate::shapes::CYLINDER_SEGMENTS;

    #[test]
    fn test_cylinder_counts() {
        let mesh = cylinder(CYLINDER_SEGMENTS);
        assert_eq!(mesh.num_vertices(), 2 + 4 * 24);
        assert_eq!(mesh.num_triangles(), 4 * 24);
    }

    #[test]
    fn test_cylinder_min_segments() {
        assert_eq!(cylinder(1).num_triangles(), cylinder(3).num_triangles());
    }

    #[test]
    fn test_cylinder_is_closed_and_outward() {
        let mesh = cylinder(CYLINDER_SEGMENTS);
        assert!(mesh.validate().is_ok());
        assert_closed(&mesh);
        assert_unit_normals(&mesh);
        assert_outward_from(&mesh, &Point3::origin());
    }

    #[test]
    fn test_cylinder_volume_approaches_pi_r2_h() {
        let vol = cylinder(256).signed_volume();
        let expected = std::f32::consts::PI * RADIUS * RADIUS;
        assert!((vol - expected).abs() < 1e-3, "volume = {vol}");
    }

    #[test]
    fn test_side_normals_are_radial() {
        let mesh = cylinder(8);
        for i in 0..mesh.num_vertices() as u32 {
            let p = mesh.position(i).unwrap();
            let n = mesh.normal(i).unwrap();
            if n.z.abs() < 1e-6 {
                let radial = Vec3::new(p.x, p.y, 0.0).normalize();
                assert!((n - radial).norm() < 1e-5);
            }
        }
    }
}
