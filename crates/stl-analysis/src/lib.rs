//! STL loading and polyhedron geometry analysis.
//!
//! This crate reads 3D surface meshes in the STL interchange format (ASCII or
//! binary) and derives geometric properties from the resulting polyhedron:
//! surface area, enclosed volume, and topological closedness.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use stl_analysis::{load_polyhedron, surface_area_parallel};
//!
//! let poly = load_polyhedron(Path::new("model.stl"))?;
//! println!("{}: {} faces", poly.name(), poly.face_count());
//! println!("surface area: {}", poly.surface_area());
//! println!("volume:       {}", poly.volume());
//! println!("closed:       {}", poly.is_closed());
//!
//! // The same area, computed across 8 worker threads.
//! let area = surface_area_parallel(&poly, 8)?;
//! # Ok::<(), stl_analysis::StlError>(())
//! ```
//!
//! # Pipeline
//!
//! Raw bytes flow through format detection ([`StlFormat::classify`]) into the
//! ASCII parser or the binary decoder, which build the [`Polyhedron`] model.
//! The measurement functions in [`measure`] and the parallel scheduler in
//! [`parallel`] operate on the finished model; the model is immutable, so
//! results never go stale.
//!
//! # Logging
//!
//! The library emits `tracing` events and never prints. Operation timing
//! goes to the `stl_analysis::timing` target:
//! `RUST_LOG=stl_analysis::timing=debug`.

pub mod ascii;
pub mod binary;
mod error;
pub mod io;
pub mod measure;
pub mod parallel;
pub mod tracing_ext;
mod types;

pub use ascii::{AsciiParse, FacetError};
pub use error::{ErrorCode, StlError, StlResult};
pub use io::{StlFormat, load_polyhedron};
pub use measure::{
    euler_characteristic, is_closed, rank_faces_by_area, total_surface_area, volume,
};
pub use parallel::surface_area_parallel;
pub use types::{Edge, Face, Polygon, Polyhedron, Triangle, Vertex};

impl Polyhedron {
    /// Load a polyhedron from an STL file. See [`io::load_polyhedron`].
    pub fn load(path: impl AsRef<std::path::Path>) -> StlResult<Self> {
        io::load_polyhedron(path.as_ref())
    }
}
