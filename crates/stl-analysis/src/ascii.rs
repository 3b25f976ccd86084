//! ASCII STL parser.
//!
//! The grammar is line oriented:
//!
//! ```text
//! solid <name...>
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//!   ...
//! endsolid <name...>
//! ```
//!
//! Lines are grouped into per-facet blocks delimited by `facet normal` and
//! `endfacet`, then each block is parsed positionally. A facet that violates
//! the grammar is skipped and recorded in [`AsciiParse::skipped`] rather than
//! aborting the whole file; callers that want fail-fast behavior check that
//! list.

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{StlError, StlResult};
use crate::types::{Face, Polyhedron, Triangle, Vertex};

const KEYWORD_SOLID: &str = "solid";
const KEYWORD_FACET: &str = "facet normal";
const KEYWORD_OUTER_LOOP: &str = "outer loop";
const KEYWORD_VERTEX: &str = "vertex";
const KEYWORD_ENDLOOP: &str = "endloop";
const KEYWORD_ENDFACET: &str = "endfacet";

/// Lines per facet block: facet normal, outer loop, 3 vertices, endloop,
/// endfacet.
const BLOCK_LINES: usize = 7;

/// One skipped facet and the reason it was rejected.
#[derive(Debug)]
pub struct FacetError {
    /// Zero-based index of the facet in file order.
    pub facet: usize,
    pub error: StlError,
}

/// Result of parsing an ASCII STL buffer.
#[derive(Debug)]
pub struct AsciiParse {
    /// The polyhedron built from every facet that parsed cleanly.
    pub polyhedron: Polyhedron,
    /// Facets that were rejected, in file order.
    pub skipped: Vec<FacetError>,
}

/// Parse an ASCII STL buffer into a polyhedron.
///
/// The name comes from the `solid` line when present and non-empty,
/// otherwise `fallback_name` is used.
pub fn parse(bytes: &[u8], fallback_name: &str) -> StlResult<AsciiParse> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut name = fallback_name.to_string();
    if let Some(first) = lines.first() {
        if let Some(rest) = first.strip_prefix(KEYWORD_SOLID) {
            let rest = rest.trim();
            if !rest.is_empty() {
                name = rest.to_string();
            }
        }
    }

    let blocks = facet_blocks(&lines);
    let mut faces = Vec::with_capacity(blocks.len());
    let mut skipped = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match parse_facet(index, block) {
            Ok(face) => faces.push(face),
            Err(error) => skipped.push(FacetError {
                facet: index,
                error,
            }),
        }
    }

    debug!(
        name = %name,
        parsed = faces.len(),
        skipped = skipped.len(),
        "parsed ASCII STL"
    );

    Ok(AsciiParse {
        polyhedron: Polyhedron::new(faces, name),
        skipped,
    })
}

/// Group trimmed lines into facet blocks, `facet normal` through `endfacet`.
///
/// Lines outside a block (the `solid` / `endsolid` lines, blank lines,
/// stray text) are ignored. An unterminated trailing block is dropped.
fn facet_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&'a str>> = None;

    for &line in lines {
        if line.starts_with(KEYWORD_FACET) {
            current = Some(vec![line]);
        } else if line.starts_with(KEYWORD_VERTEX)
            || line.starts_with(KEYWORD_OUTER_LOOP)
            || line.starts_with(KEYWORD_ENDLOOP)
        {
            if let Some(block) = current.as_mut() {
                block.push(line);
            }
        } else if line.starts_with(KEYWORD_ENDFACET) {
            if let Some(mut block) = current.take() {
                block.push(line);
                blocks.push(block);
            }
        }
    }

    blocks
}

/// Parse one facet block into a face.
fn parse_facet(index: usize, block: &[&str]) -> StlResult<Face> {
    if block.len() != BLOCK_LINES
        || !block[1].starts_with(KEYWORD_OUTER_LOOP)
        || !block[5].starts_with(KEYWORD_ENDLOOP)
    {
        return Err(StlError::malformed_facet(
            index,
            "expected `outer loop` and `endloop` around exactly three vertices",
        ));
    }

    let normal = parse_normal(index, block[0])?;
    let a = parse_vertex(index, block[2])?;
    let b = parse_vertex(index, block[3])?;
    let c = parse_vertex(index, block[4])?;

    let triangle = Triangle::from_vertices(a, b, c);
    Ok(Face::new(triangle.into_polygon(), normal))
}

fn parse_normal(facet: usize, line: &str) -> StlResult<Vector3<f32>> {
    let rest = line.strip_prefix(KEYWORD_FACET).unwrap_or(line);
    let [x, y, z] = parse_three_floats(rest).ok_or_else(|| StlError::InvalidNormal {
        facet,
        line: line.to_string(),
    })?;
    Ok(Vector3::new(x, y, z))
}

fn parse_vertex(facet: usize, line: &str) -> StlResult<Vertex> {
    let rest = line
        .strip_prefix(KEYWORD_VERTEX)
        .and_then(parse_three_floats)
        .ok_or_else(|| StlError::InvalidVertex {
            facet,
            line: line.to_string(),
        })?;
    Ok(Vertex::new(rest[0], rest[1], rest[2]))
}

/// Parse the first three whitespace-separated floats; trailing tokens are
/// ignored, matching the tolerance of common exporters.
fn parse_three_floats(text: &str) -> Option<[f32; 3]> {
    let mut parts = text.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some([x, y, z])
}
