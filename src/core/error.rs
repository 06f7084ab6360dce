//! Error types for the benchmark engine

/// Result type for benchmark engine operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while generating data or running a benchmark
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BenchError {
    /// Requested dataset size is not positive
    #[error("Invalid dataset size {requested}: size must be greater than 0")]
    InvalidSize {
        /// Size that was requested
        requested: usize,
    },

    /// Memory could not be reserved for a dataset
    #[error("Failed to allocate {requested} {kind} elements")]
    AllocationFailure {
        /// Number of elements that could not be allocated
        requested: usize,
        /// Display name of the element kind
        kind: String,
    },

    /// A result was requested before its task completed
    #[error("Result for '{algorithm}' requested before completion (state: {state})")]
    PrematureSnapshot {
        /// Name of the algorithm
        algorithm: String,
        /// State the task was observed in
        state: String,
    },

    /// A sort stopped early because its token was cancelled
    #[error("Sort cancelled ({task}): {reason}")]
    Cancelled {
        /// Task that observed the cancellation
        task: String,
        /// Reason for cancellation
        reason: String,
    },

    /// A sort worker panicked
    #[error("Worker for '{algorithm}' panicked: {message}")]
    WorkerPanic {
        /// Name of the algorithm the worker was running
        algorithm: String,
        /// Panic message
        message: String,
    },

    /// Failed to spawn a sort worker thread
    #[error("Failed to spawn worker for '{algorithm}': {message}")]
    SpawnError {
        /// Name of the algorithm the worker would have run
        algorithm: String,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to join a sort worker thread
    #[error("Failed to join worker for '{algorithm}': {message}")]
    JoinError {
        /// Name of the algorithm the worker was running
        algorithm: String,
        /// Error message
        message: String,
    },

    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// Algorithm index outside the library
    #[error("Invalid algorithm index {index}: expected 0..{count}")]
    InvalidAlgorithmIndex {
        /// Index that was requested
        index: usize,
        /// Number of algorithms in the library
        count: usize,
    },

    /// A manually entered value could not be parsed
    #[error("Invalid {kind} entry #{index}: '{value}'")]
    InvalidEntry {
        /// Position of the entry
        index: usize,
        /// Raw entry text
        value: String,
        /// Display name of the expected kind
        kind: String,
    },

    /// A run was recorded into the history before every task completed
    #[error("Run is not complete: {completed}/{total} tasks completed")]
    HistoryIncomplete {
        /// Number of completed tasks
        completed: usize,
        /// Total number of tasks
        total: usize,
    },

    /// I/O failure while exporting results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error
    #[error("{0}")]
    Other(String),
}

impl BenchError {
    /// Create an invalid size error
    pub fn invalid_size(requested: usize) -> Self {
        BenchError::InvalidSize { requested }
    }

    /// Create an allocation failure error
    pub fn allocation(requested: usize, kind: impl Into<String>) -> Self {
        BenchError::AllocationFailure {
            requested,
            kind: kind.into(),
        }
    }

    /// Create a premature snapshot error
    pub fn premature_snapshot(algorithm: impl Into<String>, state: impl Into<String>) -> Self {
        BenchError::PrematureSnapshot {
            algorithm: algorithm.into(),
            state: state.into(),
        }
    }

    /// Create a cancelled error
    pub fn cancelled(task: impl Into<String>, reason: impl Into<String>) -> Self {
        BenchError::Cancelled {
            task: task.into(),
            reason: reason.into(),
        }
    }

    /// Create a worker panic error
    pub fn worker_panic(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        BenchError::WorkerPanic {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        algorithm: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        BenchError::SpawnError {
            algorithm: algorithm.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a join error
    pub fn join(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        BenchError::JoinError {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        BenchError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an invalid algorithm index error
    pub fn invalid_algorithm_index(index: usize, count: usize) -> Self {
        BenchError::InvalidAlgorithmIndex { index, count }
    }

    /// Create an invalid entry error
    pub fn invalid_entry(index: usize, value: impl Into<String>, kind: impl Into<String>) -> Self {
        BenchError::InvalidEntry {
            index,
            value: value.into(),
            kind: kind.into(),
        }
    }

    /// Create a history incomplete error
    pub fn history_incomplete(completed: usize, total: usize) -> Self {
        BenchError::HistoryIncomplete { completed, total }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BenchError::Other(msg.into())
    }

    /// Returns true if this error came from cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BenchError::Cancelled { .. })
    }
}
