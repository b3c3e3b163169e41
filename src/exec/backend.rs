// src/exec/backend.rs

//! Pluggable run backend abstraction.

use std::future::Future;
use std::pin::Pin;
use std::time::SystemTime;

use crate::display::DisplaySink;

/// Trait abstracting how a single run is performed.
///
/// Production code uses [`super::CommandRunner`]; tests can provide their own
/// implementation that records runs and controls completion times.
pub trait RunBackend: Send {
    /// Perform one run, rendering into `display`, and return its completion
    /// time.
    ///
    /// A run can't fail from the engine's point of view: whatever went wrong
    /// belongs in the transcript.
    fn run<'a>(
        &'a mut self,
        display: &'a mut dyn DisplaySink,
    ) -> Pin<Box<dyn Future<Output = SystemTime> + Send + 'a>>;
}
