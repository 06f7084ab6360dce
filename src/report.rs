//! Plain-text export of a run's results

use crate::core::{format_elapsed, Result};
use crate::data::TypedDataset;
use crate::engine::{RunSnapshot, SortRun, TaskState};
use crate::sort::SortAlgorithm;
use std::fmt;
use std::path::Path;

/// Elements printed per line in the data sections
const VALUES_PER_LINE: usize = 10;

const RULE: &str = "========================================";

/// Text report of one run
///
/// Lists each algorithm's final time (or `running` / `not executed`),
/// the unsorted input and the selected algorithm's sorted output.
///
/// ```rust
/// use parallel_sort_bench::prelude::*;
///
/// let mut run = SortRun::start_default(TypedDataset::Int64(vec![3, 1, 2]))?;
/// run.wait();
/// let text = BenchReport::from_run(&mut run).to_string();
/// assert!(text.contains("Dataset size: 3 elements"));
/// assert!(text.contains("1, 2, 3"));
/// # Ok::<(), BenchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BenchReport {
    snapshot: Option<RunSnapshot>,
    original: TypedDataset,
    sorted: Option<TypedDataset>,
}

impl BenchReport {
    /// Report on the current state of `run`
    pub fn from_run(run: &mut SortRun) -> Self {
        let snapshot = run.poll();
        Self {
            snapshot: Some(snapshot),
            original: run.original().clone(),
            sorted: run.display_result().cloned(),
        }
    }

    /// Report on a dataset that was never sorted
    pub fn not_run(original: TypedDataset) -> Self {
        Self {
            snapshot: None,
            original,
            sorted: None,
        }
    }

    /// Write the report to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_string())?;
        log::info!("results saved to {}", path.display());
        Ok(())
    }

    fn time_label(&self, algorithm: SortAlgorithm) -> String {
        let Some(snapshot) = &self.snapshot else {
            return TaskState::NotStarted.label().to_string();
        };
        let task = snapshot.task(algorithm);
        match task.state {
            TaskState::Completed => format_elapsed(task.elapsed),
            _ => task.state.label().to_string(),
        }
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, data: &TypedDataset) -> fmt::Result {
    if data.is_empty() {
        return Ok(());
    }
    let len = data.len();
    let mut line = String::new();
    for (i, value) in data.display_values().iter().enumerate() {
        line.push_str(value);
        if i + 1 < len {
            line.push_str(", ");
        }
        if (i + 1) % VALUES_PER_LINE == 0 {
            writeln!(f, "{}", line.trim_end())?;
            line.clear();
        }
    }
    if !line.is_empty() {
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SORT RESULTS")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Dataset size: {} elements", self.original.len())?;
        writeln!(f, "Data type: {}", self.original.kind())?;

        writeln!(f)?;
        writeln!(f, "--- SORT TIMES ---")?;
        for algorithm in SortAlgorithm::ALL {
            writeln!(f, "{:<15} : {}", algorithm.name(), self.time_label(algorithm))?;
        }

        writeln!(f)?;
        writeln!(f, "--- DATA BEFORE SORT ---")?;
        write_values(f, &self.original)?;

        writeln!(f)?;
        writeln!(f, "--- DATA AFTER SORT ---")?;
        if let Some(sorted) = &self.sorted {
            write_values(f, sorted)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", RULE)
    }
}
