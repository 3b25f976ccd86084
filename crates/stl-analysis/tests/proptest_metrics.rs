//! Property tests for the numeric invariants of the analysis engine.

use nalgebra::Vector3;
use proptest::prelude::*;
use stl_analysis::{Face, Polyhedron, Triangle, Vertex, surface_area_parallel};

fn triangle_strategy() -> impl Strategy<Value = Face> {
    let coord = -50.0f32..50.0f32;
    [
        [coord.clone(), coord.clone(), coord.clone()],
        [coord.clone(), coord.clone(), coord.clone()],
        [coord.clone(), coord.clone(), coord.clone()],
    ]
    .prop_map(|[a, b, c]| {
        let tri = Triangle::from_vertices(
            Vertex::new(a[0], a[1], a[2]),
            Vertex::new(b[0], b[1], b[2]),
            Vertex::new(c[0], c[1], c[2]),
        );
        Face::new(tri.into_polygon(), Vector3::zeros())
    })
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn parallel_area_matches_serial(
        faces in prop::collection::vec(triangle_strategy(), 0..40),
        workers in 1usize..16,
    ) {
        let poly = Polyhedron::new(faces, "soup");
        let parallel = surface_area_parallel(&poly, workers).unwrap();
        prop_assert!(
            relative_eq(parallel, poly.surface_area()),
            "{} vs {}", parallel, poly.surface_area()
        );
    }

    #[test]
    fn cube_volume_is_translation_invariant(
        dx in -100.0f32..100.0,
        dy in -100.0f32..100.0,
        dz in -100.0f32..100.0,
    ) {
        let baseline = Polyhedron::new(cube(0.0, 0.0, 0.0), "cube");
        let moved = Polyhedron::new(cube(dx, dy, dz), "cube");

        // Coordinates are f32, so distant cubes lose a little precision.
        prop_assert!((baseline.volume() - moved.volume()).abs() < 1e-3);
        prop_assert!(moved.is_closed());
    }
}

/// Unit cube triangulation with outward winding.
fn cube(dx: f32, dy: f32, dz: f32) -> Vec<Face> {
    let v = [
        [dx, dy, dz],
        [dx + 1.0, dy, dz],
        [dx + 1.0, dy + 1.0, dz],
        [dx, dy + 1.0, dz],
        [dx, dy, dz + 1.0],
        [dx + 1.0, dy, dz + 1.0],
        [dx + 1.0, dy + 1.0, dz + 1.0],
        [dx, dy + 1.0, dz + 1.0],
    ];
    let triangles: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let tri = Triangle::from_vertices(
                Vertex::new(v[a][0], v[a][1], v[a][2]),
                Vertex::new(v[b][0], v[b][1], v[b][2]),
                Vertex::new(v[c][0], v[c][1], v[c][2]),
            );
            Face::new(tri.into_polygon(), Vector3::zeros())
        })
        .collect()
}
