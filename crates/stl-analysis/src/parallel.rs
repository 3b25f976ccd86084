//! Parallel surface-area computation.
//!
//! A map-reduce over the face list: the index range is split into contiguous
//! chunks of `ceil(F / workers)` faces, one short-lived thread sums the areas
//! of its own chunk into its own output slot, and after the join barrier the
//! slots are summed. The face list is shared read-only; each slot has exactly
//! one writer, so no locks or atomics are involved. Threads are spawned fresh
//! per call and are all joined before the call returns.
//!
//! The result matches the serial [`crate::measure::total_surface_area`] up to
//! floating-point summation order.

use tracing::debug;

use crate::error::{StlError, StlResult};
use crate::tracing_ext::OperationTimer;
use crate::types::{Face, Polyhedron};

/// Compute the total surface area using `workers` threads.
///
/// A worker count of 0 is treated as 1. Worker counts beyond the face count
/// leave the surplus slots at zero. If any worker panics the whole
/// computation fails with [`StlError::WorkerPanicked`].
pub fn surface_area_parallel(polyhedron: &Polyhedron, workers: usize) -> StlResult<f64> {
    let faces = polyhedron.faces();
    let workers = workers.max(1);

    if faces.is_empty() {
        return Ok(0.0);
    }

    let _timer = OperationTimer::with_faces("surface_area_parallel", faces.len());
    let chunk_len = faces.len().div_ceil(workers);
    let mut slots = vec![0.0f64; workers];

    let failed_worker = std::thread::scope(|scope| {
        let handles: Vec<_> = slots
            .iter_mut()
            .zip(faces.chunks(chunk_len))
            .map(|(slot, chunk)| {
                scope.spawn(move || {
                    *slot = chunk.iter().map(Face::area).sum();
                })
            })
            .collect();

        let mut failed = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(worker);
            }
        }
        failed
    });

    if let Some(worker) = failed_worker {
        return Err(StlError::WorkerPanicked { worker });
    }

    debug!(workers, chunk_len, "parallel area reduction complete");
    Ok(slots.iter().sum())
}
