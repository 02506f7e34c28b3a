//! Geodesic sphere by recursive icosahedron subdivision.

use std::collections::HashMap;

use rcsim_math::{Point3, Vec3};

use crate::Mesh;

/// The 20 icosahedron faces, counter-clockwise from outside.
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    // around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Unit-radius geodesic sphere.
///
/// Starts from a regular icosahedron and splits every triangle into four,
/// `level` times. Midpoints are shared between the two triangles on either
/// side of an edge and pushed back onto the unit sphere, so a level `L`
/// sphere has exactly `10 * 4^L + 2` vertices and `20 * 4^L` triangles.
/// Vertex normals equal positions. `level <= 0` returns the icosahedron.
pub fn geodesic_sphere(level: i32) -> Mesh {
    let mut mesh = icosahedron();
    for _ in 0..level.max(0) {
        subdivide(&mut mesh);
    }
    mesh
}

fn icosahedron() -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let a = 1.0;
    let b = 1.0 / phi;

    // Three orthogonal golden rectangles.
    let corners = [
        Vec3::new(-b, a, 0.0),
        Vec3::new(b, a, 0.0),
        Vec3::new(-b, -a, 0.0),
        Vec3::new(b, -a, 0.0),
        Vec3::new(0.0, -b, a),
        Vec3::new(0.0, b, a),
        Vec3::new(0.0, -b, -a),
        Vec3::new(0.0, b, -a),
        Vec3::new(a, 0.0, -b),
        Vec3::new(a, 0.0, b),
        Vec3::new(-a, 0.0, -b),
        Vec3::new(-a, 0.0, b),
    ];

    let mut mesh = Mesh::new();
    for c in corners {
        add_sphere_vertex(&mut mesh, c);
    }
    for [v0, v1, v2] in ICOSAHEDRON_FACES {
        mesh.add_triangle(v0, v1, v2);
    }
    mesh
}

fn add_sphere_vertex(mesh: &mut Mesh, direction: Vec3) -> u32 {
    let n = direction.normalize();
    mesh.add_vertex(Point3::from(n), n)
}

/// One 1-to-4 split of every triangle currently in `mesh`.
fn subdivide(mesh: &mut Mesh) {
    let previous = std::mem::take(&mut mesh.indices);
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    let mut midpoint = |mesh: &mut Mesh, i0: u32, i1: u32| -> u32 {
        let key = if i0 < i1 { (i0, i1) } else { (i1, i0) };
        *midpoints.entry(key).or_insert_with(|| {
            let p0 = mesh.position(key.0).unwrap_or_else(Point3::origin);
            let p1 = mesh.position(key.1).unwrap_or_else(Point3::origin);
            add_sphere_vertex(mesh, (p0.coords + p1.coords) * 0.5)
        })
    };

    mesh.indices.reserve(previous.len() * 4);
    for tri in previous.chunks_exact(3) {
        let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
        let m01 = midpoint(mesh, v0, v1);
        let m12 = midpoint(mesh, v1, v2);
        let m20 = midpoint(mesh, v2, v0);

        mesh.add_triangle(v0, m01, m20);
        mesh.add_triangle(m01, v1, m12);
        mesh.add_triangle(m20, m12, v2);
        mesh.add_triangle(m01, m12, m20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_closed, assert_outward_from, assert_unit_normals};
    use std::collections::HashSet;

    #[test]
    fn test_icosahedron_counts() {
        let mesh = geodesic_sphere(0);
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_triangles(), 20);
    }

    #[test]
    fn test_negative_level_is_icosahedron() {
        assert_eq!(geodesic_sphere(-3), geodesic_sphere(0));
    }

    #[test]
    fn test_subdivision_counts() {
        for level in 0..=4 {
            let mesh = geodesic_sphere(level);
            let scale = 4usize.pow(level as u32);
            assert_eq!(mesh.num_vertices(), 10 * scale + 2, "level {level}");
            assert_eq!(mesh.num_triangles(), 20 * scale, "level {level}");
        }
    }

    #[test]
    fn test_no_duplicate_positions() {
        let mesh = geodesic_sphere(3);
        let unique: HashSet<_> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| {
                let q = |v: f32| (v * 1e5).round() as i64;
                (q(p[0]), q(p[1]), q(p[2]))
            })
            .collect();
        assert_eq!(unique.len(), mesh.num_vertices());
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = geodesic_sphere(2);
        for i in 0..mesh.num_vertices() as u32 {
            let p = mesh.position(i).unwrap();
            assert!((p.coords.norm() - 1.0).abs() < 1e-5);
            assert!((mesh.normal(i).unwrap() - p.coords).norm() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_is_closed_and_outward() {
        for level in [0, 2] {
            let mesh = geodesic_sphere(level);
            assert_closed(&mesh);
            assert_unit_normals(&mesh);
            assert_outward_from(&mesh, &Point3::origin());
        }
    }

    #[test]
    fn test_volume_approaches_unit_sphere() {
        let vol = geodesic_sphere(4).signed_volume();
        let expected = 4.0 / 3.0 * std::f32::consts::PI;
        assert!((vol - expected).abs() / expected < 0.01, "volume = {vol}");
    }
}
