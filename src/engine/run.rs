//! The benchmark run coordinator

use super::config::EngineConfig;
use super::task::{TaskProgress, TaskShared, TaskState};
use super::worker::{SharedTask, SortWorker, TaskEvent};
use crate::core::{timing, CancellationReason, CancellationToken, Result};
use crate::data::TypedDataset;
use crate::sort::SortAlgorithm;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use crossbeam_utils::CachePadded;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Lifecycle of a whole run
///
/// There is no idle state: before [`SortRun::start`] returns there is no run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// At least one task is still running
    Running,
    /// Every task reached a terminal state without the run being cancelled
    Completed,
    /// The run was cancelled while running; some tasks may still have
    /// completed
    Cancelled,
}

/// Result of [`SortRun::poll`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Run identifier
    pub run_id: Uuid,
    /// One entry per algorithm, in [`SortAlgorithm::ALL`] order
    pub tasks: [TaskProgress; SortAlgorithm::COUNT],
    /// True once no task is running any more
    pub all_done: bool,
    /// Time since the run started, frozen once it is done
    pub elapsed: Duration,
}

impl RunSnapshot {
    /// Progress of one algorithm
    pub fn task(&self, algorithm: SortAlgorithm) -> &TaskProgress {
        &self.tasks[algorithm.index()]
    }

    /// Number of tasks whose output is available
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    /// True if every task completed
    pub fn all_completed(&self) -> bool {
        self.completed_count() == SortAlgorithm::COUNT
    }
}

struct TaskSlot {
    shared: SharedTask,
    token: CancellationToken,
    worker: Option<SortWorker>,
    observed: TaskProgress,
    samples: Vec<Duration>,
}

impl TaskSlot {
    fn new(algorithm: SortAlgorithm, token: CancellationToken) -> Self {
        Self {
            shared: Arc::new(CachePadded::new(TaskShared::new(algorithm))),
            token,
            worker: None,
            observed: TaskProgress::new(algorithm),
            samples: Vec::new(),
        }
    }

    fn algorithm(&self) -> SortAlgorithm {
        self.observed.algorithm
    }

    fn record_sample(&mut self, elapsed: Duration, config: &EngineConfig) {
        if self.samples.len() >= config.max_progress_samples {
            return;
        }
        let last = self.samples.last().copied().unwrap_or(Duration::ZERO);
        if elapsed.saturating_sub(last) >= config.progress_interval {
            self.samples.push(elapsed);
        }
    }
}

/// One benchmark run: four workers racing over private copies of one dataset
///
/// The run owns the original dataset and never lets a worker touch it.
/// Every worker sorts its own deep copy and publishes the result when done.
/// All query methods are non-blocking except [`wait`](Self::wait) and
/// [`wait_timeout`](Self::wait_timeout).
///
/// Dropping a run cancels any worker still running and joins it (bounded
/// by [`EngineConfig::join_timeout`]) before the worker's data is released.
///
/// # Example
///
/// ```rust
/// use parallel_sort_bench::prelude::*;
///
/// let data = generate_dataset(500, DataKind::Int64)?;
/// let mut run = SortRun::start(data, EngineConfig::default())?;
///
/// let snapshot = run.wait();
/// assert!(snapshot.all_completed());
/// assert!(run.snapshot_result(SortAlgorithm::Shell)?.is_sorted());
/// # Ok::<(), BenchError>(())
/// ```
pub struct SortRun {
    id: Uuid,
    config: EngineConfig,
    original: TypedDataset,
    token: CancellationToken,
    started_at: Instant,
    finished_at: Option<Instant>,
    cancelled_at: Option<Instant>,
    tasks: [TaskSlot; SortAlgorithm::COUNT],
    events: Receiver<TaskEvent>,
    display: Option<TypedDataset>,
}

impl std::fmt::Debug for SortRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortRun")
            .field("id", &self.id)
            .field("kind", &self.original.kind())
            .field("len", &self.original.len())
            .field("state", &self.state())
            .finish()
    }
}

impl SortRun {
    /// Start a run over `original` with one worker per algorithm
    ///
    /// All four private copies are made before any worker starts, so an
    /// allocation failure aborts the run with nothing running.
    ///
    /// # Errors
    ///
    /// - [`BenchError::InvalidConfig`](crate::BenchError::InvalidConfig) if `config` does not validate
    /// - [`BenchError::AllocationFailure`](crate::BenchError::AllocationFailure) if a copy cannot be allocated
    /// - [`BenchError::SpawnError`](crate::BenchError::SpawnError) if a worker thread cannot be started
    pub fn start(original: TypedDataset, config: EngineConfig) -> Result<Self> {
        Self::start_with_job(original, config, |algorithm, mut data, token| {
            algorithm.sort_dataset(&mut data, token)?;
            Ok(data)
        })
    }

    /// Start a run whose workers execute `job` on their private copy
    pub(crate) fn start_with_job<J>(
        original: TypedDataset,
        config: EngineConfig,
        job: J,
    ) -> Result<Self>
    where
        J: Fn(SortAlgorithm, TypedDataset, &CancellationToken) -> Result<TypedDataset>
            + Clone
            + Send
            + 'static,
    {
        config.validate()?;

        let started_at = timing::now();

        let mut copies = Vec::with_capacity(SortAlgorithm::COUNT);
        for _ in SortAlgorithm::ALL {
            copies.push(original.deep_copy()?);
        }

        let token = CancellationToken::new();
        let (events_tx, events_rx) = crossbeam_channel::unbounded();

        let tasks = SortAlgorithm::ALL.map(|algorithm| TaskSlot::new(algorithm, token.child()));
        let mut run = SortRun {
            id: Uuid::new_v4(),
            config,
            original,
            token,
            started_at,
            finished_at: None,
            cancelled_at: None,
            tasks,
            events: events_rx,
            display: None,
        };

        log::info!(
            "run {} started: {} {} elements",
            run.id,
            run.original.len(),
            run.original.kind()
        );
        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_run_start(run.original.kind(), run.original.len());

        for (slot, data) in run.tasks.iter_mut().zip(copies) {
            let algorithm = slot.algorithm();
            let job = job.clone();
            // on error the partially started run is dropped, which stops
            // and joins the workers spawned so far
            let worker = SortWorker::spawn(
                Arc::clone(&slot.shared),
                slot.token.clone(),
                events_tx.clone(),
                &run.config,
                move |token| job(algorithm, data, token),
            )?;
            slot.worker = Some(worker);
        }

        run.poll();
        Ok(run)
    }

    /// Start a run with the default configuration
    pub fn start_default(original: TypedDataset) -> Result<Self> {
        Self::start(original, EngineConfig::default())
    }

    /// Unique identifier of this run
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The unsorted input, unchanged for the whole run
    pub fn original(&self) -> &TypedDataset {
        &self.original
    }

    /// Configuration the run was started with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Overall state as of the last [`poll`](Self::poll)
    ///
    /// `Completed` and `Cancelled` are final. A run can only be cancelled
    /// while a task is still running.
    pub fn state(&self) -> RunState {
        if self.cancelled_at.is_some() {
            RunState::Cancelled
        } else if self.finished_at.is_some() {
            RunState::Completed
        } else {
            RunState::Running
        }
    }

    /// Time since start, frozen once the run is cancelled or every task is
    /// terminal
    pub fn elapsed(&self) -> Duration {
        self.cancelled_at
            .or(self.finished_at)
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.started_at)
    }

    /// Refresh task progress without blocking
    ///
    /// Running tasks report the time since the run started, or the time
    /// frozen by a stop request they have not answered yet. Terminal tasks
    /// report their final time, which never changes afterwards. The first
    /// poll that sees the selected algorithm completed captures its output
    /// as the display result.
    ///
    /// The configured time limit is enforced here: the first poll past the
    /// limit cancels whatever is still running.
    pub fn poll(&mut self) -> RunSnapshot {
        let so_far = Instant::now().saturating_duration_since(self.started_at);
        let mut newly_completed = Vec::new();

        if let Some(limit) = self.config.time_limit {
            if so_far >= limit && self.finished_at.is_none() && self.cancelled_at.is_none() {
                self.request_cancel(CancellationReason::Timeout(limit));
            }
        }

        for slot in self.tasks.iter_mut() {
            if slot.observed.state.is_terminal() {
                continue;
            }

            let current = slot.shared.progress();
            match current.state {
                TaskState::NotStarted | TaskState::Running => {
                    slot.observed.state = current.state;
                    match slot.shared.pending_cancel() {
                        Some(frozen) => slot.observed.elapsed = frozen,
                        None => {
                            slot.observed.elapsed = so_far.max(slot.observed.elapsed);
                            slot.record_sample(so_far, &self.config);
                        }
                    }
                }
                TaskState::Completed => {
                    log::debug!(
                        "run {}: {} completed ({})",
                        self.id,
                        current.algorithm,
                        timing::format_elapsed(current.elapsed)
                    );
                    newly_completed.push(current.algorithm);
                    slot.observed = current;
                }
                TaskState::Cancelled | TaskState::Failed(_) => {
                    log::debug!("run {}: {} {}", self.id, current.algorithm, current.state);
                    slot.observed = current;
                }
            }
        }

        if newly_completed.contains(&self.config.selected) {
            self.capture_display();
        }

        if self.finished_at.is_none() && self.tasks.iter().all(|t| t.observed.state.is_terminal()) {
            self.finished_at = Some(Instant::now());
            let snapshot = self.snapshot();
            log::info!(
                "run {} finished: {}/{} completed in {}",
                self.id,
                snapshot.completed_count(),
                SortAlgorithm::COUNT,
                timing::format_elapsed(snapshot.elapsed)
            );
        }

        self.snapshot()
    }

    /// Last observed progress, without refreshing
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            run_id: self.id,
            tasks: std::array::from_fn(|i| self.tasks[i].observed.clone()),
            all_done: self.finished_at.is_some(),
            elapsed: self.elapsed(),
        }
    }

    /// Independent copy of an algorithm's sorted output
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::PrematureSnapshot`](crate::BenchError::PrematureSnapshot) unless the task completed.
    pub fn snapshot_result(&self, algorithm: SortAlgorithm) -> Result<TypedDataset> {
        self.tasks[algorithm.index()].shared.snapshot()
    }

    /// [`snapshot_result`](Self::snapshot_result) by task index
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidAlgorithmIndex`](crate::BenchError::InvalidAlgorithmIndex) for an index outside `0..4`.
    pub fn snapshot_result_at(&self, index: usize) -> Result<TypedDataset> {
        self.snapshot_result(SortAlgorithm::from_index(index)?)
    }

    /// Ask every task that is still running to stop
    ///
    /// Timers freeze at this call. Each worker stops at its next
    /// cancellation check and becomes `Cancelled`; a worker whose sort
    /// already finished still publishes and becomes `Completed`. Use
    /// [`wait`](Self::wait) to see the final states. Returns the number of
    /// tasks asked to stop; zero means nothing was running and the run is
    /// unaffected.
    pub fn cancel(&mut self) -> usize {
        let count = self.request_cancel(CancellationReason::Manual);
        self.poll();
        count
    }

    fn request_cancel(&mut self, reason: CancellationReason) -> usize {
        let now = Instant::now();
        let so_far = now.saturating_duration_since(self.started_at);
        let count = self
            .tasks
            .iter()
            .filter(|slot| slot.shared.request_cancel(so_far))
            .count();
        if count == 0 {
            return 0;
        }

        self.cancelled_at = Some(now);
        self.token.cancel_with_reason(reason.clone());
        log::info!("run {} cancelled ({}): {} task(s) asked to stop", self.id, reason, count);
        #[cfg(feature = "tracing")]
        crate::tracing::metrics::record_cancel(count);

        count
    }

    /// Ask a single task to stop, leaving the others running
    ///
    /// Returns false if the task had already reached a terminal state or
    /// was already asked to stop.
    pub fn cancel_task(&mut self, algorithm: SortAlgorithm) -> bool {
        let slot = &self.tasks[algorithm.index()];
        let so_far = Instant::now().saturating_duration_since(self.started_at);
        if !slot.shared.request_cancel(so_far) {
            return false;
        }
        slot.token.cancel();
        log::info!("run {}: {} cancelled", self.id, algorithm);
        self.poll();
        true
    }

    /// The selected algorithm's output, captured when it completed
    pub fn display_result(&self) -> Option<&TypedDataset> {
        self.display.as_ref()
    }

    /// Algorithm whose output is kept as the display result
    pub fn selected(&self) -> SortAlgorithm {
        self.config.selected
    }

    /// Switch the display result to another algorithm
    ///
    /// If that algorithm already completed its output is captured now,
    /// otherwise it will be captured by the poll that observes completion.
    pub fn select(&mut self, algorithm: SortAlgorithm) {
        self.config.selected = algorithm;
        self.display = None;
        if self.tasks[algorithm.index()].observed.is_completed() {
            self.capture_display();
        }
    }

    /// Elapsed-time samples recorded while the task was running
    pub fn progress_samples(&self, algorithm: SortAlgorithm) -> &[Duration] {
        &self.tasks[algorithm.index()].samples
    }

    /// Block until every task is terminal
    pub fn wait(&mut self) -> RunSnapshot {
        loop {
            let snapshot = self.poll();
            if snapshot.all_done {
                return snapshot;
            }
            if !self.next_event(self.config.wait_interval) {
                return self.poll();
            }
        }
    }

    /// Block until every task is terminal or `timeout` passes
    ///
    /// Returns `None` on timeout; the run keeps going.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<RunSnapshot> {
        let deadline = Instant::now() + timeout;
        loop {
            let snapshot = self.poll();
            if snapshot.all_done {
                return Some(snapshot);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let step = self.config.wait_interval.min(deadline - now);
            if !self.next_event(step) {
                let snapshot = self.poll();
                return snapshot.all_done.then_some(snapshot);
            }
        }
    }

    /// Stop whatever is still running and join every worker thread
    ///
    /// # Errors
    ///
    /// Returns the first [`BenchError::JoinError`](crate::BenchError::JoinError) encountered; every worker
    /// is joined regardless.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.finished_at.is_none() {
            self.request_cancel(CancellationReason::Shutdown);
        }

        let mut first_error = None;
        for slot in self.tasks.iter_mut() {
            if let Some(worker) = slot.worker.take() {
                if let Err(e) = worker.join() {
                    log::error!("run {}: {}", self.id, e);
                    first_error.get_or_insert(e);
                }
            }
        }
        self.poll();

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Wait for one worker event; false once every worker has exited
    fn next_event(&self, timeout: Duration) -> bool {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                log::trace!("run {}: {} is {}", self.id, event.algorithm, event.state);
                true
            }
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn capture_display(&mut self) {
        let selected = self.config.selected;
        match self.snapshot_result(selected) {
            Ok(result) => self.display = Some(result),
            Err(e) => log::warn!("run {}: cannot capture {} output: {}", self.id, selected, e),
        }
    }
}

impl Drop for SortRun {
    fn drop(&mut self) {
        let running = self
            .tasks
            .iter()
            .any(|t| t.worker.as_ref().is_some_and(|w| !w.is_finished()));
        if running {
            self.token.cancel_with_reason(CancellationReason::Shutdown);
        }

        for slot in self.tasks.iter_mut() {
            if let Some(mut worker) = slot.worker.take() {
                if !worker.join_timeout(self.config.join_timeout) {
                    log::warn!(
                        "run {}: {} worker leaked on drop",
                        self.id,
                        worker.algorithm()
                    );
                }
            }
        }
    }
}
