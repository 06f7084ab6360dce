//! Per-task state shared between a run and its worker

use crate::core::{BenchError, Result};
use crate::data::TypedDataset;
use crate::sort::SortAlgorithm;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle of one sort task
///
/// `NotStarted -> Running -> {Completed | Cancelled | Failed}`. The three
/// right-hand states are terminal and never change once reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Worker not launched yet
    NotStarted,
    /// Worker is sorting its private copy
    Running,
    /// Sorted output and elapsed time are published
    Completed,
    /// Stopped before completion; elapsed is the time spent until then
    Cancelled,
    /// The worker failed or panicked
    Failed(String),
}

impl TaskState {
    /// True for `Completed`, `Cancelled` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Cancelled | TaskState::Failed(_)
        )
    }

    /// Short label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::NotStarted => "not executed",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Cancelled => "cancelled",
            TaskState::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Failed(message) => write!(f, "failed: {}", message),
            other => f.write_str(other.label()),
        }
    }
}

/// Point-in-time view of one task, as reported by [`SortRun::poll`](super::SortRun::poll)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    /// Algorithm this task runs
    pub algorithm: SortAlgorithm,
    /// Observed state
    pub state: TaskState,
    /// Final sort time once terminal, elapsed-so-far estimate while running
    pub elapsed: Duration,
}

impl TaskProgress {
    pub(crate) fn new(algorithm: SortAlgorithm) -> Self {
        Self {
            algorithm,
            state: TaskState::NotStarted,
            elapsed: Duration::ZERO,
        }
    }

    /// True once the sorted output is available
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// True while the worker is sorting
    pub fn is_running(&self) -> bool {
        self.state == TaskState::Running
    }

    /// Elapsed time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[derive(Debug)]
struct TaskStatus {
    state: TaskState,
    elapsed: Duration,
    // elapsed-so-far frozen when the coordinator asked the worker to stop
    cancel_requested: Option<Duration>,
}

/// Status and output slot of one task
///
/// Only the worker moves a task out of `Running`. The coordinator can ask
/// for a stop with [`request_cancel`](Self::request_cancel), which freezes
/// the displayed time but leaves the state alone; the worker then ends as
/// `Cancelled` if its sort stopped early, or `Completed` if the sort had
/// already finished. The output slot is filled before the status flips to
/// `Completed`, so anyone who sees `Completed` will find the output.
#[derive(Debug)]
pub(crate) struct TaskShared {
    algorithm: SortAlgorithm,
    status: Mutex<TaskStatus>,
    output: Mutex<Option<TypedDataset>>,
}

impl TaskShared {
    pub(crate) fn new(algorithm: SortAlgorithm) -> Self {
        Self {
            algorithm,
            status: Mutex::new(TaskStatus {
                state: TaskState::NotStarted,
                elapsed: Duration::ZERO,
                cancel_requested: None,
            }),
            output: Mutex::new(None),
        }
    }

    pub(crate) fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// Current state and elapsed time
    pub(crate) fn progress(&self) -> TaskProgress {
        let status = self.status.lock();
        TaskProgress {
            algorithm: self.algorithm,
            state: status.state.clone(),
            elapsed: status.elapsed,
        }
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.status.lock().cancel_requested.is_some()
    }

    /// Frozen elapsed time of a stop request the worker has not answered yet
    pub(crate) fn pending_cancel(&self) -> Option<Duration> {
        let status = self.status.lock();
        if status.state.is_terminal() {
            None
        } else {
            status.cancel_requested
        }
    }

    pub(crate) fn mark_running(&self) {
        let mut status = self.status.lock();
        if status.state == TaskState::NotStarted {
            status.state = TaskState::Running;
        }
    }

    /// Ask the worker to stop, freezing the displayed time at `elapsed`
    ///
    /// Returns false if the task is already terminal or a stop was already
    /// requested.
    pub(crate) fn request_cancel(&self, elapsed: Duration) -> bool {
        let mut status = self.status.lock();
        if status.state.is_terminal() || status.cancel_requested.is_some() {
            return false;
        }
        status.cancel_requested = Some(elapsed);
        true
    }

    /// Publish sorted output; returns false if the task was already terminal
    ///
    /// A pending stop request does not prevent publication: a sort that
    /// finished wins over a cancellation it never observed.
    pub(crate) fn complete(&self, output: TypedDataset, elapsed: Duration) -> bool {
        let mut status = self.status.lock();
        if status.state.is_terminal() {
            return false;
        }
        *self.output.lock() = Some(output);
        status.elapsed = elapsed;
        status.state = TaskState::Completed;
        true
    }

    /// Record that the worker stopped before finishing its sort
    ///
    /// The final time is the one frozen by [`request_cancel`](Self::request_cancel)
    /// when the coordinator asked for the stop, otherwise the worker's own
    /// `measured` time. Returns false if already terminal.
    pub(crate) fn cancel(&self, measured: Duration) -> bool {
        let mut status = self.status.lock();
        if status.state.is_terminal() {
            return false;
        }
        status.elapsed = status.cancel_requested.unwrap_or(measured);
        status.state = TaskState::Cancelled;
        true
    }

    /// Mark the task failed; returns false if already terminal
    pub(crate) fn fail(&self, message: String, elapsed: Duration) -> bool {
        let mut status = self.status.lock();
        if status.state.is_terminal() {
            return false;
        }
        status.elapsed = elapsed;
        status.state = TaskState::Failed(message);
        true
    }

    /// Independent copy of the published output
    ///
    /// # Errors
    ///
    /// - [`BenchError::PrematureSnapshot`] unless the task is `Completed`
    /// - [`BenchError::AllocationFailure`] if the copy cannot be allocated
    pub(crate) fn snapshot(&self) -> Result<TypedDataset> {
        let state = self.status.lock().state.clone();
        if state != TaskState::Completed {
            return Err(BenchError::premature_snapshot(
                self.algorithm.name(),
                state.label(),
            ));
        }

        match self.output.lock().as_ref() {
            Some(output) => output.deep_copy(),
            None => Err(BenchError::other(format!(
                "{} completed without output",
                self.algorithm.name()
            ))),
        }
    }
}
