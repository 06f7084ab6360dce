//! Configuration for benchmark runs

use crate::core::{BenchError, Result};
use crate::sort::SortAlgorithm;
use std::time::Duration;

/// Smallest stack a sort worker may be given
const MIN_STACK_SIZE: usize = 64 * 1024;

/// Configuration for a [`SortRun`](super::SortRun)
///
/// # Example
///
/// ```rust
/// use parallel_sort_bench::prelude::*;
/// use std::time::Duration;
///
/// let config = EngineConfig::new()
///     .with_thread_name_prefix("bench")
///     .with_selected(SortAlgorithm::Shell)
///     .with_time_limit(Duration::from_secs(30));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Worker thread name prefix; each worker is named `<prefix>-<algorithm>`
    pub thread_name_prefix: String,
    /// Stack size for worker threads (None = platform default)
    pub stack_size: Option<usize>,
    /// Minimum spacing between two progress samples of a running task.
    /// Default: 50ms
    pub progress_interval: Duration,
    /// Maximum number of progress samples kept per task. Default: 100
    pub max_progress_samples: usize,
    /// How long [`SortRun::wait`](super::SortRun::wait) blocks on the event
    /// channel before re-reading task status. Default: 10ms
    pub wait_interval: Duration,
    /// How long dropping a run waits for each worker to exit. Default: 5s
    pub join_timeout: Duration,
    /// Cancel the whole run once this much time has passed (None = no limit)
    ///
    /// Checked by [`SortRun::poll`](super::SortRun::poll) and the `wait` methods.
    pub time_limit: Option<Duration>,
    /// Algorithm whose sorted output is kept as the run's display result.
    /// Default: Quick
    pub selected: SortAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "sort-worker".to_string(),
            stack_size: None,
            progress_interval: Duration::from_millis(50),
            max_progress_samples: 100,
            wait_interval: Duration::from_millis(10),
            join_timeout: Duration::from_secs(5),
            time_limit: None,
            selected: SortAlgorithm::Quick,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker stack size in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Set the progress sampling interval and the per-task sample cap
    ///
    /// # Panics
    ///
    /// Panics if interval is zero.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_progress_sampling(mut self, interval: Duration, max_samples: usize) -> Self {
        assert!(!interval.is_zero(), "progress interval must be non-zero");
        self.progress_interval = interval;
        self.max_progress_samples = max_samples;
        self
    }

    /// Set how often a blocking wait re-reads task status
    ///
    /// # Panics
    ///
    /// Panics if interval is zero.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_wait_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "wait interval must be non-zero");
        self.wait_interval = interval;
        self
    }

    /// Set how long dropping a run waits for each worker
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = timeout;
        self
    }

    /// Cancel the run automatically after `limit`
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Choose the algorithm whose result is kept for display
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_selected(mut self, algorithm: SortAlgorithm) -> Self {
        self.selected = algorithm;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.thread_name_prefix.is_empty() {
            return Err(BenchError::invalid_config(
                "thread_name_prefix",
                "Thread name prefix must not be empty",
            ));
        }
        if let Some(bytes) = self.stack_size {
            if bytes < MIN_STACK_SIZE {
                return Err(BenchError::invalid_config(
                    "stack_size",
                    format!("Stack size must be at least {} bytes", MIN_STACK_SIZE),
                ));
            }
        }
        if self.progress_interval.is_zero() {
            return Err(BenchError::invalid_config(
                "progress_interval",
                "Progress interval must be non-zero",
            ));
        }
        if self.wait_interval.is_zero() {
            return Err(BenchError::invalid_config(
                "wait_interval",
                "Wait interval must be non-zero",
            ));
        }
        if self.time_limit.is_some_and(|limit| limit.is_zero()) {
            return Err(BenchError::invalid_config(
                "time_limit",
                "Time limit must be non-zero",
            ));
        }
        Ok(())
    }
}
