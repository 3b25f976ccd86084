//! Timing helpers built on the `tracing` ecosystem.
//!
//! Operations that want timing create an [`OperationTimer`] at the top of
//! their scope; the elapsed time is logged when the value drops. There is no
//! global stopwatch and nothing to reset between measurements.
//!
//! Timing events go to the `stl_analysis::timing` target, so they can be
//! enabled independently: `RUST_LOG=stl_analysis::timing=debug`.

use std::time::Instant;
use tracing::{debug, info};

/// Scoped timer that logs its elapsed time on drop.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    /// Start timing a named operation.
    pub fn new(name: &'static str) -> Self {
        debug!(target: "stl_analysis::timing", operation = name, "starting");
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Start timing with the face count attached to the log events.
    pub fn with_faces(name: &'static str, face_count: usize) -> Self {
        debug!(
            target: "stl_analysis::timing",
            operation = name,
            faces = face_count,
            "starting"
        );
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer was created, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            target: "stl_analysis::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", self.elapsed_ms()),
            "completed"
        );
    }
}
