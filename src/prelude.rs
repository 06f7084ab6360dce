//! Convenient re-exports for common types

pub use crate::core::{
    format_duration, format_elapsed, BenchError, CancellationReason, CancellationToken, Result,
};
pub use crate::data::{generate_dataset, DataKind, DatasetGenerator, GeneratorConfig, TypedDataset};
pub use crate::engine::{EngineConfig, RunSnapshot, RunState, SortRun, TaskProgress, TaskState};
pub use crate::history::{HistoryEntry, PerformanceHistory};
pub use crate::report::BenchReport;
pub use crate::sort::SortAlgorithm;
