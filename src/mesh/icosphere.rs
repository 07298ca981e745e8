//! Icosahedron subdivision on the unit sphere.

use std::collections::HashMap;

use super::Mesh;
use crate::math::Point3;

/// Builds a unit icosphere by repeated midpoint subdivision.
pub fn build(subdivisions: u32) -> Mesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;

    let mut coordinates: Vec<Point3> = vec![
        Point3::new(-1.0, phi, 0.0),
        Point3::new(1.0, phi, 0.0),
        Point3::new(-1.0, -phi, 0.0),
        Point3::new(1.0, -phi, 0.0),
        Point3::new(0.0, -1.0, phi),
        Point3::new(0.0, 1.0, phi),
        Point3::new(0.0, -1.0, -phi),
        Point3::new(0.0, 1.0, -phi),
        Point3::new(phi, 0.0, -1.0),
        Point3::new(phi, 0.0, 1.0),
        Point3::new(-phi, 0.0, -1.0),
        Point3::new(-phi, 0.0, 1.0),
    ];
    for point in &mut coordinates {
        normalize(point);
    }

    let mut faces: Vec<[u32; 3]> = vec![
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

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut coordinates, &mut midpoints, a, b);
            let bc = midpoint(&mut coordinates, &mut midpoints, b, c);
            let ca = midpoint(&mut coordinates, &mut midpoints, c, a);
            next_faces.push([a, ab, ca]);
            next_faces.push([b, bc, ab]);
            next_faces.push([c, ca, bc]);
            next_faces.push([ab, bc, ca]);
        }
        faces = next_faces;
    }

    Mesh { coordinates, faces }
}

/// Returns the sphere-projected midpoint of edge `(a, b)`, caching so the
/// vertex is shared between the two triangles on either side of the edge.
fn midpoint(
    coordinates: &mut Vec<Point3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }
    let mut point = Point3::from((coordinates[a as usize].coords + coordinates[b as usize].coords) / 2.0);
    normalize(&mut point);
    #[allow(clippy::cast_possible_truncation)]
    let index = coordinates.len() as u32;
    coordinates.push(point);
    cache.insert(key, index);
    index
}

fn normalize(point: &mut Point3) {
    let norm = point.coords.norm();
    point.coords /= norm;
}
