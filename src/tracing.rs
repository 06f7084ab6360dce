//! Trace events for observability
//!
//! With the `tracing` feature enabled every sort worker runs inside a
//! `sort_worker` span carrying its algorithm name, and the engine emits the
//! events below. Field names follow the `counter.*` / `histogram.*`
//! convention understood by tracing-to-metrics bridges.
//!
//! # Example
//!
//! ```rust,ignore
//! use parallel_sort_bench::prelude::*;
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env()
//!         .add_directive("parallel_sort_bench=trace".parse().unwrap()))
//!     .init();
//!
//! let mut run = SortRun::start_default(generate_dataset(10_000, DataKind::Int64)?)?;
//! run.wait();
//! ```

/// Metric-style trace events emitted by the engine
#[cfg(feature = "tracing")]
pub mod metrics {
    use crate::data::DataKind;
    use crate::sort::SortAlgorithm;
    use std::time::Duration;

    /// Records a run starting its workers.
    #[inline]
    pub fn record_run_start(kind: DataKind, size: usize) {
        tracing::info!(
            counter.runs_started = 1,
            kind = kind.display_name(),
            size = size,
            "sort run started"
        );
    }

    /// Records a task reaching a terminal state other than a panic.
    #[inline]
    pub fn record_completion(algorithm: SortAlgorithm, duration: Duration, completed: bool) {
        let duration_us = duration.as_micros() as u64;
        if completed {
            tracing::trace!(
                counter.sorts_completed = 1,
                histogram.sort_duration_us = duration_us,
                algorithm = algorithm.name(),
                "sort completed"
            );
        } else {
            tracing::trace!(
                counter.sorts_stopped = 1,
                histogram.sort_duration_us = duration_us,
                algorithm = algorithm.name(),
                "sort stopped before completion"
            );
        }
    }

    /// Records a worker panic.
    #[inline]
    pub fn record_panic(algorithm: SortAlgorithm, duration: Duration) {
        tracing::trace!(
            counter.sorts_panicked = 1,
            histogram.sort_duration_us = duration.as_micros() as u64,
            algorithm = algorithm.name(),
            "sort worker panicked"
        );
    }

    /// Records a run cancellation.
    #[inline]
    pub fn record_cancel(tasks_cancelled: usize) {
        tracing::info!(
            counter.runs_cancelled = 1,
            tasks_cancelled = tasks_cancelled,
            "sort run cancelled"
        );
    }
}
