//! # Parallel Sort Bench
//!
//! A benchmark engine that races several sorting algorithms against each
//! other on the same typed dataset, one thread per algorithm.
//!
//! ## Features
//!
//! - **Typed datasets**: integers, reals, characters and strings behind one
//!   [`TypedDataset`] type, generated randomly or parsed from user entries
//! - **Sort library**: bubble, insertion, shell and quick sort, each usable
//!   on its own over any `PartialOrd` slice
//! - **Isolated workers**: every algorithm sorts its own deep copy; the
//!   original is never touched
//! - **Non-blocking progress**: [`SortRun::poll`] reports each task's state
//!   and elapsed time while the workers keep going
//! - **Cooperative cancellation**: a run, or a single task, can be stopped
//!   at any time and the workers exit promptly
//! - **Results**: sorted snapshots, a bounded [`PerformanceHistory`] and a
//!   plain-text [`BenchReport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use parallel_sort_bench::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let data = generate_dataset(1_000, DataKind::String)?;
//! let mut run = SortRun::start_default(data)?;
//!
//! // poll() never blocks; a UI would call it once per frame
//! while !run.poll().all_done {
//!     std::thread::sleep(std::time::Duration::from_millis(5));
//! }
//!
//! for task in run.poll().tasks.iter() {
//!     println!("{}: {}", task.algorithm, format_elapsed(task.elapsed));
//! }
//! assert!(run.snapshot_result(SortAlgorithm::Quick)?.is_sorted());
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! ```rust
//! use parallel_sort_bench::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let data = generate_dataset(20_000, DataKind::Int64)?;
//! let mut run = SortRun::start_default(data)?;
//!
//! run.cancel();
//! let snapshot = run.wait();
//! assert!(snapshot.all_done);
//! assert_eq!(run.state(), RunState::Cancelled);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the algorithms directly
//!
//! ```rust
//! use parallel_sort_bench::sort::shell_sort;
//! use parallel_sort_bench::CancellationToken;
//!
//! let mut words = vec!["pear", "apple", "fig"];
//! shell_sort(&mut words, &CancellationToken::new()).unwrap();
//! assert_eq!(words, ["apple", "fig", "pear"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod data;
pub mod engine;
pub mod history;
pub mod prelude;
pub mod report;
pub mod sort;
pub mod tracing;

pub use core::{
    format_duration, format_elapsed, BenchError, CancellationReason, CancellationToken, Result,
};
pub use data::{generate_dataset, DataKind, DatasetGenerator, GeneratorConfig, TypedDataset};
pub use engine::{EngineConfig, RunSnapshot, RunState, SortRun, TaskProgress, TaskState};
pub use history::{HistoryEntry, PerformanceHistory};
pub use report::BenchReport;
pub use sort::SortAlgorithm;
