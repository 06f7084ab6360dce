//! Sort worker threads

use super::config::EngineConfig;
use super::task::{TaskShared, TaskState};
use crate::core::{timing, BenchError, CancellationToken, Result};
use crate::data::TypedDataset;
use crate::sort::SortAlgorithm;
use crossbeam_channel::Sender;
use crossbeam_utils::CachePadded;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::{debug, span, Level};

/// Sent by a worker right before its thread exits
#[derive(Clone, Debug)]
pub(crate) struct TaskEvent {
    pub algorithm: SortAlgorithm,
    pub state: TaskState,
}

pub(crate) type SharedTask = Arc<CachePadded<TaskShared>>;

/// One thread sorting one private dataset copy
#[derive(Debug)]
pub(crate) struct SortWorker {
    algorithm: SortAlgorithm,
    thread: Option<thread::JoinHandle<()>>,
    join_timeout: Duration,
}

impl SortWorker {
    /// Mark the task running and start its thread
    ///
    /// `job` receives the task's cancellation token and returns the sorted
    /// dataset. Only the time spent inside `job` is measured.
    pub(crate) fn spawn<F>(
        shared: SharedTask,
        token: CancellationToken,
        events: Sender<TaskEvent>,
        config: &EngineConfig,
        job: F,
    ) -> Result<Self>
    where
        F: FnOnce(&CancellationToken) -> Result<TypedDataset> + Send + 'static,
    {
        let algorithm = shared.algorithm();
        let name = format!(
            "{}-{}",
            config.thread_name_prefix,
            algorithm.name().to_lowercase().replace(' ', "-")
        );

        let mut builder = thread::Builder::new().name(name);
        if let Some(bytes) = config.stack_size {
            builder = builder.stack_size(bytes);
        }

        shared.mark_running();
        let task = Arc::clone(&shared);
        let spawned = builder.spawn(move || Self::run(task, token, events, job));

        match spawned {
            Ok(thread) => Ok(Self {
                algorithm,
                thread: Some(thread),
                join_timeout: config.join_timeout,
            }),
            Err(e) => {
                shared.fail(e.to_string(), Duration::ZERO);
                Err(BenchError::spawn_with_source(
                    algorithm.name(),
                    "thread spawn failed",
                    e,
                ))
            }
        }
    }

    pub(crate) fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// True once the thread has exited (or was already joined)
    pub(crate) fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Join the worker thread
    pub(crate) fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|payload| BenchError::join(self.algorithm.name(), panic_message(&*payload)))?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for the thread; returns false if it is still running
    pub(crate) fn join_timeout(&mut self, timeout: Duration) -> bool {
        let Some(thread) = self.thread.take() else {
            return true;
        };

        let start = Instant::now();
        while !thread.is_finished() {
            if start.elapsed() >= timeout {
                // dropping the handle detaches the thread
                log::warn!(
                    "{} worker did not finish within {:?}; detaching",
                    self.algorithm,
                    timeout
                );
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }

        if let Err(payload) = thread.join() {
            log::error!(
                "{} worker panicked during shutdown: {}",
                self.algorithm,
                panic_message(&*payload)
            );
        }
        true
    }

    fn run<F>(task: SharedTask, token: CancellationToken, events: Sender<TaskEvent>, job: F)
    where
        F: FnOnce(&CancellationToken) -> Result<TypedDataset>,
    {
        let algorithm = task.algorithm();

        #[cfg(feature = "tracing")]
        let worker_span = span!(Level::DEBUG, "sort_worker", algorithm = algorithm.name());
        #[cfg(feature = "tracing")]
        let _guard = worker_span.enter();

        log::debug!("{} worker started", algorithm);

        let start = timing::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| job(&token)));
        let elapsed = start.elapsed();

        match outcome {
            Ok(Ok(sorted)) => {
                if task.complete(sorted, elapsed) {
                    log::info!(
                        "{} completed in {}",
                        algorithm,
                        timing::format_elapsed(elapsed)
                    );
                    #[cfg(feature = "tracing")]
                    {
                        debug!(duration_us = elapsed.as_micros() as u64, "sort completed");
                        crate::tracing::metrics::record_completion(algorithm, elapsed, true);
                    }
                } else {
                    log::warn!("{} finished on a task that was already terminal", algorithm);
                }
                if task.cancel_requested() {
                    log::debug!("{} finished before observing its stop request", algorithm);
                }
            }
            Ok(Err(e)) if e.is_cancelled() => {
                task.cancel(elapsed);
                log::info!("{} stopped: {}", algorithm, e);
                #[cfg(feature = "tracing")]
                crate::tracing::metrics::record_completion(algorithm, elapsed, false);
            }
            Ok(Err(e)) => {
                task.fail(e.to_string(), elapsed);
                log::warn!("{} failed: {}", algorithm, e);
                #[cfg(feature = "tracing")]
                crate::tracing::metrics::record_completion(algorithm, elapsed, false);
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                let error = BenchError::worker_panic(algorithm.name(), message);
                task.fail(error.to_string(), elapsed);
                log::error!("{}", error);
                #[cfg(feature = "tracing")]
                crate::tracing::metrics::record_panic(algorithm, elapsed);
            }
        }

        // the receiver may already be gone if the run was dropped
        let _ = events.send(TaskEvent {
            algorithm,
            state: task.progress().state,
        });
    }
}

impl Drop for SortWorker {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.join_timeout(self.join_timeout);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
