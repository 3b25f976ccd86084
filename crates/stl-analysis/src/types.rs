//! Core polyhedron data types.
//!
//! The model mirrors what an STL file actually contains: faces built from
//! triangles, triangles built from shared vertices. Coordinates are stored as
//! `f32` (the precision of both STL variants); all derived geometry is
//! accumulated in `f64`.
//!
//! Everything here is immutable after construction. Vertices, edges and faces
//! are created by the parsers and never touched again; a [`Polyhedron`] is
//! born complete and read-only.

use std::hash::{Hash, Hasher};

use nalgebra::Vector3;

use crate::error::{StlError, StlResult};
use crate::measure;

/// A point in 3D space with `f32` coordinates.
///
/// Equality and hashing are based on the bit patterns of the coordinates, so
/// vertices decoded from the same bytes always compare equal and can be
/// deduplicated through a hash set. No epsilon is involved.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    x: f32,
    y: f32,
    z: f32,
}

impl Vertex {
    /// Create a new vertex from raw coordinates.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    /// The vertex as a position vector from the origin, widened to `f64`.
    #[inline]
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Euclidean distance to another vertex.
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    #[inline]
    fn bits(&self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// An unordered pair of vertices.
///
/// Direction does not matter for identity: `(a, b)` equals `(b, a)` and both
/// hash to the same value. The start/end distinction is only kept so a
/// polygon can walk its loop in order.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: Vertex,
    end: Vertex,
}

impl Edge {
    /// Create a new edge between two vertices.
    #[inline]
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Vertex {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vertex {
        self.end
    }

    /// Both endpoints, start first.
    #[inline]
    pub fn vertices(&self) -> [Vertex; 2] {
        [self.start, self.end]
    }

    /// Length of the edge.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Endpoints in a direction-independent order, for equality and hashing.
    fn canonical(&self) -> ([u32; 3], [u32; 3]) {
        let a = self.start.bits();
        let b = self.end.bits();
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// A closed loop of edges, where edge `i` ends where edge `i + 1` starts.
///
/// The parsers only ever build triangles, but the area formula is written for
/// the general case so non-triangular loops measure correctly too.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    edges: Vec<Edge>,
}

impl Polygon {
    /// Create a polygon from an ordered edge loop.
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The vertex loop: the start vertex of each edge, in edge order.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.edges.iter().map(|edge| edge.start()).collect()
    }

    /// The vertex loop with duplicates removed, first occurrence order.
    pub fn unique_vertices(&self) -> Vec<Vertex> {
        let mut seen = hashbrown::HashSet::new();
        let mut unique = Vec::new();
        for edge in &self.edges {
            for vertex in edge.vertices() {
                if seen.insert(vertex) {
                    unique.push(vertex);
                }
            }
        }
        unique
    }

    /// The edges with duplicates removed, first occurrence order.
    pub fn unique_edges(&self) -> Vec<Edge> {
        let mut seen = hashbrown::HashSet::new();
        let mut unique = Vec::new();
        for &edge in &self.edges {
            if seen.insert(edge) {
                unique.push(edge);
            }
        }
        unique
    }

    /// Area of the polygon via Newell's formula.
    ///
    /// Accumulates cross-product contributions over every consecutive vertex
    /// pair and takes half the magnitude of the resulting vector. Exact for
    /// planar loops, a sensible measure for nearly planar ones. A loop with
    /// fewer than 3 vertices has zero area.
    pub fn area(&self) -> f64 {
        let vertices = self.vertices();
        let n = vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut normal = Vector3::<f64>::zeros();
        for i in 0..n {
            let a = vertices[i].to_vector();
            let b = vertices[(i + 1) % n].to_vector();
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }

        0.5 * normal.norm()
    }
}

/// A polygon constrained to exactly three edges.
///
/// This is a constructor-time invariant rather than a subtype: once built,
/// a triangle is handed around as its underlying [`Polygon`].
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Build a triangle from three corner vertices.
    ///
    /// Edges are synthesized in loop order `(a,b)`, `(b,c)`, `(c,a)`.
    pub fn from_vertices(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            polygon: Polygon::new(vec![Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]),
        }
    }

    /// Build a triangle from an explicit edge list.
    ///
    /// Rejects lists whose length is not 3. Degenerate triangles (repeated
    /// corners) are representable; only the edge count is enforced.
    pub fn from_edges(edges: Vec<Edge>) -> StlResult<Self> {
        if edges.len() != 3 {
            return Err(StlError::WrongEdgeCount { found: edges.len() });
        }
        Ok(Self {
            polygon: Polygon::new(edges),
        })
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }
}

/// A polygon together with its stored normal vector.
///
/// The normal is read verbatim from the file and is not validated against
/// the winding of the polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    polygon: Polygon,
    normal: Vector3<f32>,
}

impl Face {
    /// Create a face from a polygon and its stored normal.
    pub fn new(polygon: Polygon, normal: Vector3<f32>) -> Self {
        Self { polygon, normal }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Area of the underlying polygon.
    #[inline]
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }
}

/// An ordered collection of faces with a name.
///
/// Surface area and volume are computed once at construction and cached;
/// the face list is never mutated afterwards, so the cache cannot go stale.
/// Topological properties are computed on demand.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    name: String,
    faces: Vec<Face>,
    surface_area: f64,
    volume: f64,
}

impl Polyhedron {
    /// Build a polyhedron from its faces, computing the derived metrics.
    pub fn new(faces: Vec<Face>, name: impl Into<String>) -> Self {
        let surface_area = measure::total_surface_area(&faces);
        let volume = measure::volume(&faces);
        Self {
            name: name.into(),
            faces,
            surface_area,
            volume,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Total surface area, cached at construction.
    #[inline]
    pub fn surface_area(&self) -> f64 {
        self.surface_area
    }

    /// Enclosed volume, cached at construction.
    ///
    /// Only meaningful for a closed, consistently wound mesh; see
    /// [`measure::volume`] for the precondition.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Every vertex of every edge of every face, duplicates included.
    ///
    /// Renderers use this flattened view directly; deduplication is the
    /// business of the topology checks, not of this accessor.
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            for edge in face.polygon().edges() {
                vertices.extend(edge.vertices());
            }
        }
        vertices
    }

    /// Euler characteristic over deduplicated vertices and edges.
    pub fn euler_characteristic(&self) -> i64 {
        measure::euler_characteristic(&self.faces)
    }

    /// Whether the polyhedron is a closed (watertight, genus-0) surface.
    pub fn is_closed(&self) -> bool {
        measure::is_closed(&self.faces)
    }
}
