//! Error types for STL loading and geometry analysis.
//!
//! Every error carries a machine-readable code in the format `STL-XXXX`:
//! - `STL-1xxx`: file access and format classification
//! - `STL-2xxx`: ASCII grammar errors
//! - `STL-3xxx`: binary layout errors
//! - `STL-4xxx`: model validation errors
//! - `STL-5xxx`: concurrency errors
//!
//! The library never prints; callers decide how to display these values.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for STL operations.
pub type StlResult<T> = Result<T, StlError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// STL-1001: Failed to read file
    IoRead = 1001,
    /// STL-1002: File extension is not `.stl`
    UnsupportedExtension = 1002,
    /// STL-1003: Buffer shorter than the classification window
    HeaderTooShort = 1003,

    /// STL-2001: Facet block violates the ASCII grammar
    MalformedFacet = 2001,
    /// STL-2002: Unparseable facet normal
    InvalidNormal = 2002,
    /// STL-2003: Unparseable facet vertex
    InvalidVertex = 2003,

    /// STL-3001: Declared triangle count exceeds the available bytes
    TruncatedData = 3001,

    /// STL-4001: Triangle constructed from an edge list of the wrong length
    WrongEdgeCount = 4001,

    /// STL-5001: A worker thread died during the parallel area computation
    WorkerPanicked = 5001,
}

impl ErrorCode {
    /// Returns the code as a string in the format `STL-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IoRead => "STL-1001",
            ErrorCode::UnsupportedExtension => "STL-1002",
            ErrorCode::HeaderTooShort => "STL-1003",
            ErrorCode::MalformedFacet => "STL-2001",
            ErrorCode::InvalidNormal => "STL-2002",
            ErrorCode::InvalidVertex => "STL-2003",
            ErrorCode::TruncatedData => "STL-3001",
            ErrorCode::WrongEdgeCount => "STL-4001",
            ErrorCode::WorkerPanicked => "STL-5001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while loading or analyzing an STL polyhedron.
#[derive(Debug, Error, Diagnostic)]
pub enum StlError {
    /// Error reading from a file.
    #[error("failed to read {path}")]
    #[diagnostic(
        code(stl::io::read),
        help("Check that the file exists and is readable")
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not the STL extension.
    #[error("not an STL file: extension {extension:?}")]
    #[diagnostic(
        code(stl::format::extension),
        help("Only `.stl` files are accepted; rename or convert the input")
    )]
    UnsupportedExtension { extension: Option<String> },

    /// Buffer is too short to be classified as ASCII or binary.
    #[error("file too short to classify: {len} bytes, need at least 80")]
    #[diagnostic(
        code(stl::format::header),
        help("A valid STL file starts with an 80 byte header or `solid` line")
    )]
    HeaderTooShort { len: usize },

    /// A facet block violates the positional ASCII grammar.
    #[error("facet {facet}: {details}")]
    #[diagnostic(
        code(stl::ascii::facet),
        help("Each facet must be `facet normal` / `outer loop` / 3 vertices / `endloop` / `endfacet`")
    )]
    MalformedFacet { facet: usize, details: String },

    /// The three floats of a `facet normal` line failed to parse.
    #[error("facet {facet}: invalid normal `{line}`")]
    #[diagnostic(code(stl::ascii::normal))]
    InvalidNormal { facet: usize, line: String },

    /// The three floats of a `vertex` line failed to parse.
    #[error("facet {facet}: invalid vertex `{line}`")]
    #[diagnostic(code(stl::ascii::vertex))]
    InvalidVertex { facet: usize, line: String },

    /// The declared binary triangle count does not fit in the buffer.
    #[error(
        "binary STL truncated: {declared} triangles need {expected} bytes, buffer has {actual}"
    )]
    #[diagnostic(
        code(stl::binary::truncated),
        help("The file was cut off during download or export; re-export it")
    )]
    TruncatedData {
        declared: u32,
        expected: usize,
        actual: usize,
    },

    /// A triangle was constructed from an edge list whose length is not 3.
    #[error("a triangle needs exactly 3 edges, got {found}")]
    #[diagnostic(code(stl::model::edge_count))]
    WrongEdgeCount { found: usize },

    /// A worker thread died during the parallel surface-area computation.
    #[error("surface-area worker {worker} panicked")]
    #[diagnostic(
        code(stl::parallel::worker),
        help("Re-run the computation; the polyhedron itself is untouched")
    )]
    WorkerPanicked { worker: usize },
}

impl StlError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StlError::IoRead { .. } => ErrorCode::IoRead,
            StlError::UnsupportedExtension { .. } => ErrorCode::UnsupportedExtension,
            StlError::HeaderTooShort { .. } => ErrorCode::HeaderTooShort,
            StlError::MalformedFacet { .. } => ErrorCode::MalformedFacet,
            StlError::InvalidNormal { .. } => ErrorCode::InvalidNormal,
            StlError::InvalidVertex { .. } => ErrorCode::InvalidVertex,
            StlError::TruncatedData { .. } => ErrorCode::TruncatedData,
            StlError::WrongEdgeCount { .. } => ErrorCode::WrongEdgeCount,
            StlError::WorkerPanicked { .. } => ErrorCode::WorkerPanicked,
        }
    }

    /// Create an IoRead error.
    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StlError::IoRead {
            path: path.into(),
            source,
        }
    }

    /// Create a MalformedFacet error.
    pub fn malformed_facet(facet: usize, details: impl Into<String>) -> Self {
        StlError::MalformedFacet {
            facet,
            details: details.into(),
        }
    }
}
