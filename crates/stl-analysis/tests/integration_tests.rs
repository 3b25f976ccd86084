//! End-to-end tests: write an STL file, load it, measure the polyhedron.

use std::io::Write;

use stl_analysis::{
    Polyhedron, StlError, load_polyhedron, rank_faces_by_area, surface_area_parallel,
};
use tempfile::NamedTempFile;

/// Vertices of the unit cube, offset by a constant vector.
fn cube_vertices(offset: [f32; 3]) -> [[f32; 3]; 8] {
    let [dx, dy, dz] = offset;
    [
        [dx, dy, dz],
        [dx + 1.0, dy, dz],
        [dx + 1.0, dy + 1.0, dz],
        [dx, dy + 1.0, dz],
        [dx, dy, dz + 1.0],
        [dx + 1.0, dy, dz + 1.0],
        [dx + 1.0, dy + 1.0, dz + 1.0],
        [dx, dy + 1.0, dz + 1.0],
    ]
}

/// Triangulation of the cube, outward winding viewed from outside.
const CUBE_TRIANGLES: [[usize; 3]; 12] = [
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

fn ascii_stl(name: &str, triangles: &[[[f32; 3]; 3]]) -> String {
    let mut text = format!("solid {}\n", name);
    for triangle in triangles {
        text.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in triangle {
            text.push_str(&format!("      vertex {} {} {}\n", x, y, z));
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str(&format!("endsolid {}\n", name));
    text
}

fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for triangle in triangles {
        for _ in 0..3 {
            bytes.extend_from_slice(&0f32.to_le_bytes());
        }
        for [x, y, z] in triangle {
            bytes.extend_from_slice(&x.to_le_bytes());
            bytes.extend_from_slice(&y.to_le_bytes());
            bytes.extend_from_slice(&z.to_le_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());
    }
    bytes
}

fn cube_triangles(offset: [f32; 3]) -> Vec<[[f32; 3]; 3]> {
    let v = cube_vertices(offset);
    CUBE_TRIANGLES
        .iter()
        .map(|&[a, b, c]| [v[a], v[b], v[c]])
        .collect()
}

fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".stl").unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn load_cube() -> Polyhedron {
    let text = ascii_stl("cube", &cube_triangles([0.0, 0.0, 0.0]));
    let file = write_temp(text.as_bytes());
    load_polyhedron(file.path()).expect("cube should load")
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn unit_cube_from_ascii() {
    let poly = load_cube();
    assert_eq!(poly.name(), "cube");
    assert_eq!(poly.face_count(), 12);
    assert!(approx_eq(poly.surface_area(), 6.0));
    assert!(approx_eq(poly.volume(), 1.0));
    assert_eq!(poly.euler_characteristic(), 2);
    assert!(poly.is_closed());
}

#[test]
fn ascii_and_binary_encodings_agree() {
    let triangles = cube_triangles([0.0, 0.0, 0.0]);

    let ascii_file = write_temp(ascii_stl("cube", &triangles).as_bytes());
    let binary_file = write_temp(&binary_stl(&triangles));

    let from_ascii = load_polyhedron(ascii_file.path()).unwrap();
    let from_binary = load_polyhedron(binary_file.path()).unwrap();

    assert_eq!(from_ascii.face_count(), from_binary.face_count());
    assert!(approx_eq(from_ascii.surface_area(), from_binary.surface_area()));
    assert!(approx_eq(from_ascii.volume(), from_binary.volume()));
    assert_eq!(from_ascii.is_closed(), from_binary.is_closed());
}

#[test]
fn parallel_area_matches_serial_for_all_worker_counts() {
    let poly = load_cube();
    let serial = poly.surface_area();
    for workers in [1, 2, 4, 8] {
        let parallel = surface_area_parallel(&poly, workers).unwrap();
        assert!(
            approx_eq(parallel, serial),
            "workers={}: {} vs {}",
            workers,
            parallel,
            serial
        );
    }
}

#[test]
fn isolated_triangle_is_open() {
    let text = ascii_stl(
        "lonely",
        &[[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0]]],
    );
    let file = write_temp(text.as_bytes());
    let poly = load_polyhedron(file.path()).unwrap();

    assert_eq!(poly.face_count(), 1);
    assert!(approx_eq(poly.surface_area(), 6.0));
    assert_eq!(poly.euler_characteristic(), 1);
    assert!(!poly.is_closed());
}

#[test]
fn translation_leaves_volume_and_closedness_unchanged() {
    let here = load_cube();

    let text = ascii_stl("cube", &cube_triangles([10.0, -7.0, 42.0]));
    let file = write_temp(text.as_bytes());
    let there = load_polyhedron(file.path()).unwrap();

    assert!(approx_eq(here.volume(), there.volume()));
    assert_eq!(here.is_closed(), there.is_closed());
}

#[test]
fn truncated_binary_fails_without_partial_result() {
    let mut bytes = binary_stl(&cube_triangles([0.0, 0.0, 0.0]));
    // Drop the last record and a half.
    bytes.truncate(bytes.len() - 75);
    let file = write_temp(&bytes);

    match load_polyhedron(file.path()) {
        Err(StlError::TruncatedData { declared, .. }) => assert_eq!(declared, 12),
        other => panic!("expected TruncatedData, got {:?}", other),
    }
}

#[test]
fn faces_rank_ascending_by_area() {
    // Right triangles with legs (2, h): area == h.
    let heights = [5.0f32, 1.0, 3.0, 9.0, 2.0];
    let triangles: Vec<[[f32; 3]; 3]> = heights
        .iter()
        .map(|&h| [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, h, 0.0]])
        .collect();
    let file = write_temp(ascii_stl("fans", &triangles).as_bytes());
    let poly = load_polyhedron(file.path()).unwrap();

    let ranked = rank_faces_by_area(poly.faces());
    let areas: Vec<f64> = ranked.iter().map(|face| face.area()).collect();
    for (got, want) in areas.iter().zip([1.0, 2.0, 3.0, 5.0, 9.0]) {
        assert!(approx_eq(*got, want), "got {:?}", areas);
    }
}

#[test]
fn wrong_extension_is_rejected_before_reading() {
    let mut file = NamedTempFile::with_suffix(".obj").unwrap();
    file.write_all(ascii_stl("cube", &cube_triangles([0.0, 0.0, 0.0])).as_bytes())
        .unwrap();

    match load_polyhedron(file.path()) {
        Err(StlError::UnsupportedExtension { extension }) => {
            assert_eq!(extension.as_deref(), Some("obj"));
        }
        other => panic!("expected UnsupportedExtension, got {:?}", other),
    }
}

#[test]
fn polyhedron_load_convenience() {
    let text = ascii_stl("cube", &cube_triangles([0.0, 0.0, 0.0]));
    let file = write_temp(text.as_bytes());
    let poly = Polyhedron::load(file.path()).unwrap();
    assert_eq!(poly.face_count(), 12);
}
