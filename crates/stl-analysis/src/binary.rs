//! Binary STL decoder.
//!
//! Fixed little-endian layout:
//!
//! ```text
//! bytes 0..80    header (optional embedded name, otherwise padding)
//! bytes 80..84   u32 triangle count N
//! then N records of 50 bytes each:
//!     3 x f32    normal
//!     9 x f32    three vertices
//!     1 x u16    attribute byte count (ignored)
//! ```
//!
//! Decoding is strict: if the declared count does not fit in the buffer the
//! whole load fails. A truncated final record is an error, not a skip.

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{StlError, StlResult};
use crate::io::HEADER_LEN;
use crate::types::{Face, Polyhedron, Triangle, Vertex};

const COUNT_LEN: usize = 4;
const RECORD_LEN: usize = 50;

/// Decode a binary STL buffer into a polyhedron.
///
/// The name comes from the header text when it is non-blank, otherwise
/// `fallback_name` is used.
pub fn parse(bytes: &[u8], fallback_name: &str) -> StlResult<Polyhedron> {
    if bytes.len() < HEADER_LEN + COUNT_LEN {
        return Err(StlError::HeaderTooShort { len: bytes.len() });
    }

    let name = header_name(&bytes[..HEADER_LEN]).unwrap_or_else(|| fallback_name.to_string());
    let declared = read_u32(bytes, HEADER_LEN);

    let expected = (declared as usize)
        .checked_mul(RECORD_LEN)
        .and_then(|body| body.checked_add(HEADER_LEN + COUNT_LEN))
        .unwrap_or(usize::MAX);
    if bytes.len() < expected {
        return Err(StlError::TruncatedData {
            declared,
            expected,
            actual: bytes.len(),
        });
    }

    let body = &bytes[HEADER_LEN + COUNT_LEN..expected];
    let mut faces = Vec::with_capacity(declared as usize);
    for record in body.chunks_exact(RECORD_LEN) {
        faces.push(decode_record(record));
    }

    debug!(name = %name, triangles = faces.len(), "decoded binary STL");

    Ok(Polyhedron::new(faces, name))
}

/// Extract the embedded name from the 80-byte header, if any.
///
/// Headers are commonly zero-padded or space-padded; both count as blank.
fn header_name(header: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(header);
    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode one 50-byte triangle record. The trailing two attribute bytes are
/// ignored.
fn decode_record(record: &[u8]) -> Face {
    let normal = Vector3::new(
        read_f32(record, 0),
        read_f32(record, 4),
        read_f32(record, 8),
    );
    let vertex = |base: usize| {
        Vertex::new(
            read_f32(record, base),
            read_f32(record, base + 4),
            read_f32(record, base + 8),
        )
    };

    let triangle = Triangle::from_vertices(vertex(12), vertex(24), vertex(36));
    Face::new(triangle.into_polygon(), normal)
}

#[inline]
fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
