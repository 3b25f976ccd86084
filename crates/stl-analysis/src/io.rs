//! File loading and format detection.
//!
//! [`load_polyhedron`] is the single entry point: read the file, classify the
//! buffer as ASCII or binary, dispatch to the matching parser, log a summary,
//! hand back the polyhedron.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{StlError, StlResult};
use crate::types::Polyhedron;
use crate::{ascii, binary};

/// Length of the binary header, which doubles as the classification window.
pub const HEADER_LEN: usize = 80;

/// The only accepted file extension, matched case-insensitively.
pub const STL_EXTENSION: &str = "stl";

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

impl StlFormat {
    /// Classify a raw buffer as ASCII or binary STL.
    ///
    /// The first 80 bytes are interpreted as text; if the trimmed text
    /// begins with `solid` the buffer is ASCII, otherwise binary. Buffers
    /// shorter than the window cannot be classified and are rejected.
    ///
    /// Known limitation: a binary file whose header happens to start with
    /// the ASCII bytes `solid` is misclassified as ASCII. Real exporters
    /// avoid that header, and the ASCII parse of such a file yields an
    /// empty polyhedron rather than garbage.
    pub fn classify(bytes: &[u8]) -> StlResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(StlError::HeaderTooShort { len: bytes.len() });
        }

        let window = String::from_utf8_lossy(&bytes[..HEADER_LEN]);
        if window.trim_start().starts_with("solid") {
            Ok(StlFormat::Ascii)
        } else {
            Ok(StlFormat::Binary)
        }
    }
}

/// Load a polyhedron from an STL file.
///
/// Runs detection, parsing and model construction. Format and truncation
/// errors abort the load; ASCII facets that fail to parse are skipped and
/// logged (see [`ascii::parse`] for the per-facet report).
pub fn load_polyhedron(path: &Path) -> StlResult<Polyhedron> {
    check_extension(path)?;

    let bytes = fs::read(path).map_err(|e| StlError::io_read(path, e))?;
    let format = StlFormat::classify(&bytes)?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "loading STL");

    let fallback_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());

    let polyhedron = match format {
        StlFormat::Ascii => {
            let parse = ascii::parse(&bytes, &fallback_name)?;
            for skipped in &parse.skipped {
                warn!(
                    facet = skipped.facet,
                    error = %skipped.error,
                    "skipped malformed facet"
                );
            }
            parse.polyhedron
        }
        StlFormat::Binary => binary::parse(&bytes, &fallback_name)?,
    };

    debug!(
        name = polyhedron.name(),
        faces = polyhedron.face_count(),
        surface_area = polyhedron.surface_area(),
        volume = polyhedron.volume(),
        "loaded polyhedron"
    );

    Ok(polyhedron)
}

fn check_extension(path: &Path) -> StlResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    if extension.as_deref() == Some(STL_EXTENSION) {
        Ok(())
    } else {
        Err(StlError::UnsupportedExtension { extension })
    }
}
