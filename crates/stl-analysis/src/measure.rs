//! Geometry metrics over an immutable face list.
//!
//! Pure functions, no state: parse, build the model, then call whatever
//! metric is needed. [`crate::Polyhedron`] calls the area and volume
//! functions once at construction and caches the results; the topology
//! checks run on demand because they walk every edge of every face.

use hashbrown::HashSet;
use tracing::debug;

use crate::tracing_ext::OperationTimer;
use crate::types::{Edge, Face, Vertex};

/// Euler characteristic value of a closed, genus-0 polyhedral surface.
pub const EULER_CLOSED: i64 = 2;

/// Total surface area: the sum of per-face polygon areas.
///
/// Faces with degenerate polygons (fewer than 3 vertices, or collapsed
/// corners) contribute zero instead of failing the computation. An empty
/// face list yields `0.0`.
pub fn total_surface_area(faces: &[Face]) -> f64 {
    let _timer = OperationTimer::with_faces("surface_area", faces.len());
    faces.iter().map(Face::area).sum()
}

/// Enclosed volume via the divergence theorem.
///
/// For each face the first vertex of its unique vertex loop is fixed as a
/// base point, and every consecutive pair of the remaining vertices
/// contributes the signed tetrahedron volume `base · (vᵢ × vᵢ₊₁) / 6`.
/// The absolute value of the total is returned.
///
/// Only mathematically correct for a closed, consistently wound mesh. On an
/// open or inconsistently wound mesh the result is an approximation that
/// depends on the face polygons, not a true volume.
pub fn volume(faces: &[Face]) -> f64 {
    let _timer = OperationTimer::with_faces("volume", faces.len());

    let mut total = 0.0f64;
    for face in faces {
        let vertices = face.polygon().unique_vertices();
        if vertices.len() < 3 {
            continue;
        }

        let base = vertices[0].to_vector();
        for pair in vertices[1..].windows(2) {
            let v1 = pair[0].to_vector();
            let v2 = pair[1].to_vector();
            total += base.dot(&v1.cross(&v2)) / 6.0;
        }
    }

    total.abs()
}

/// Euler characteristic `V − E + F` over deduplicated vertices and edges.
///
/// Vertices and edges are collected across the whole face list and
/// deduplicated by value, so shared corners and shared edges between
/// neighboring faces count once.
pub fn euler_characteristic(faces: &[Face]) -> i64 {
    let mut vertices: HashSet<Vertex> = HashSet::new();
    let mut edges: HashSet<Edge> = HashSet::new();

    for face in faces {
        for edge in face.polygon().edges() {
            vertices.insert(edge.start());
            vertices.insert(edge.end());
            edges.insert(*edge);
        }
    }

    let characteristic =
        vertices.len() as i64 - edges.len() as i64 + faces.len() as i64;
    debug!(
        vertices = vertices.len(),
        edges = edges.len(),
        faces = faces.len(),
        characteristic,
        "computed Euler characteristic"
    );
    characteristic
}

/// Whether the face list forms a closed (watertight, genus-0) surface.
///
/// An empty face list is not closed.
pub fn is_closed(faces: &[Face]) -> bool {
    euler_characteristic(faces) == EULER_CLOSED
}

/// Faces ordered by ascending polygon area.
///
/// The sort is stable, so equal-area faces keep their original order.
pub fn rank_faces_by_area(faces: &[Face]) -> Vec<Face> {
    let mut keyed: Vec<(f64, Face)> =
        faces.iter().map(|face| (face.area(), face.clone())).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, face)| face).collect()
}
