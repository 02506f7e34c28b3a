//! Simplified fighter silhouette.
//!
//! The airframe is a union of closed convex pieces: a faceted fuselage, a
//! delta wing, a horizontal stabilizer, and a vertical fin. Pieces overlap
//! where they join the fuselage but never share vertices, so every piece
//! stays watertight on its own and the whole mesh is closed.

use rcsim_math::{face_normal, Point3, Vec3};

use crate::Mesh;

/// Half thickness of the flat lifting surfaces.
const SKIN: f32 = 0.01;

/// A closed convex solid as a list of planar faces plus a point inside it.
struct Piece {
    faces: Vec<Vec<Point3>>,
    interior: Point3,
}

/// Aircraft target, nose along +X, Z-up, about 2 x 1.2 x 0.45 units.
pub fn aircraft() -> Mesh {
    let mut mesh = Mesh::new();
    for piece in pieces() {
        mesh.merge(&piece_mesh(&piece));
    }
    mesh
}

fn pieces() -> Vec<Piece> {
    vec![fuselage(), wing(), stabilizer(), fin()]
}

fn fuselage() -> Piece {
    let nose = Point3::new(1.0, 0.0, 0.0);
    // Top, left, bottom, right.
    let mid = [
        Point3::new(0.0, 0.0, 0.12),
        Point3::new(0.0, 0.1, 0.0),
        Point3::new(0.0, 0.0, -0.08),
        Point3::new(0.0, -0.1, 0.0),
    ];
    let tail = mid.map(|p| Point3::new(-0.9, p.y * 0.5, p.z * 0.5));

    let mut faces = Vec::with_capacity(9);
    for i in 0..4 {
        let j = (i + 1) % 4;
        faces.push(vec![nose, mid[i], mid[j]]);
        faces.push(vec![mid[i], tail[i], tail[j], mid[j]]);
    }
    faces.push(tail.to_vec());

    Piece {
        faces,
        interior: Point3::new(-0.3, 0.0, 0.01),
    }
}

fn wing() -> Piece {
    slab(
        &[
            Point3::new(0.2, 0.0, 0.0),
            Point3::new(-0.1, 0.6, 0.0),
            Point3::new(-0.4, 0.0, 0.0),
            Point3::new(-0.1, -0.6, 0.0),
        ],
        Vec3::new(0.0, 0.0, SKIN),
    )
}

fn stabilizer() -> Piece {
    slab(
        &[
            Point3::new(-0.7, 0.0, 0.03),
            Point3::new(-0.85, 0.25, 0.03),
            Point3::new(-0.9, 0.0, 0.03),
            Point3::new(-0.85, -0.25, 0.03),
        ],
        Vec3::new(0.0, 0.0, SKIN),
    )
}

fn fin() -> Piece {
    slab(
        &[
            Point3::new(-0.55, 0.0, 0.02),
            Point3::new(-0.82, 0.0, 0.4),
            Point3::new(-0.9, 0.0, 0.02),
        ],
        Vec3::new(0.0, SKIN, 0.0),
    )
}

/// Extrude a convex planar outline by `±offset` into a closed prism.
fn slab(outline: &[Point3], offset: Vec3) -> Piece {
    let top: Vec<Point3> = outline.iter().map(|p| p + offset).collect();
    let bottom: Vec<Point3> = outline.iter().map(|p| p - offset).collect();

    let n = outline.len();
    let mut faces = Vec::with_capacity(n + 2);
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(vec![bottom[i], bottom[j], top[j], top[i]]);
    }
    faces.push(top);
    faces.push(bottom);

    let sum = outline
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Piece {
        faces,
        interior: Point3::from(sum / n as f32),
    }
}

fn piece_mesh(piece: &Piece) -> Mesh {
    let mut mesh = Mesh::new();
    for face in &piece.faces {
        add_convex_face(&mut mesh, face, &piece.interior);
    }
    mesh
}

/// Fan-triangulate a convex planar polygon with a flat normal facing away
/// from `interior`.
fn add_convex_face(mesh: &mut Mesh, polygon: &[Point3], interior: &Point3) {
    let Some(mut normal) = face_normal(&polygon[0], &polygon[1], &polygon[2]) else {
        return;
    };
    let mut ordered = polygon.to_vec();
    if normal.dot(&(polygon[0] - interior)) < 0.0 {
        ordered.reverse();
        normal = -normal;
    }

    let base = mesh.num_vertices() as u32;
    for p in &ordered {
        mesh.add_vertex(*p, normal);
    }
    for k in 1..ordered.len() as u32 - 1 {
        mesh.add_triangle(base, base + k, base + k + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{assert_closed, assert_outward_from, assert_unit_normals};

    #[test]
    fn test_aircraft_counts() {
        let mesh = aircraft();
        // Fuselage: 4 nose + 8 body + 2 tail triangles.
        // Wing and stabilizer: 8 side + 4 cap triangles each.
        // Fin: 6 side + 2 cap triangles.
        assert_eq!(mesh.num_triangles(), 14 + 12 + 12 + 8);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_pieces_are_closed_convex_and_outward() {
        for piece in pieces() {
            let mesh = piece_mesh(&piece);
            assert_closed(&mesh);
            assert_unit_normals(&mesh);
            assert_outward_from(&mesh, &piece.interior);
            assert!(mesh.signed_volume() > 0.0);
        }
    }

    #[test]
    fn test_aircraft_is_closed() {
        let mesh = aircraft();
        assert_closed(&mesh);
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_aircraft_extent() {
        let mesh = aircraft();
        let xs = mesh.positions.iter().step_by(3);
        let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        assert!((max_x - 1.0).abs() < 1e-6, "nose at +X");
        assert!((min_x + 0.9).abs() < 1e-6);
    }
}
