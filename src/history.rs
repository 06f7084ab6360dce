//! Bounded record of completed runs
//!
//! Each fully completed run contributes one [`HistoryEntry`]: the dataset
//! size and kind plus the final time of every algorithm. The history keeps
//! the most recent [`DEFAULT_HISTORY_CAPACITY`] entries and evicts the
//! oldest one when full, which is what a size-versus-time chart wants.

use crate::core::{BenchError, Result};
use crate::data::DataKind;
use crate::engine::SortRun;
use crate::sort::SortAlgorithm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Number of entries kept by [`PerformanceHistory::new`]
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Timings of one completed run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Run the timings come from
    pub run_id: Uuid,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
    /// Number of elements sorted
    pub dataset_size: usize,
    /// Element kind sorted
    pub kind: DataKind,
    /// Final sort time per algorithm, in [`SortAlgorithm::ALL`] order
    pub times: [Duration; SortAlgorithm::COUNT],
}

impl HistoryEntry {
    /// Final time of one algorithm
    pub fn time(&self, algorithm: SortAlgorithm) -> Duration {
        self.times[algorithm.index()]
    }

    /// Algorithm with the smallest time; ties go to the earlier algorithm
    pub fn fastest(&self) -> SortAlgorithm {
        SortAlgorithm::ALL
            .into_iter()
            .min_by_key(|a| self.time(*a))
            .unwrap_or(SortAlgorithm::Quick)
    }
}

/// Ring buffer of [`HistoryEntry`] values, oldest first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerformanceHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl PerformanceHistory {
    /// Empty history holding up to [`DEFAULT_HISTORY_CAPACITY`] entries
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Empty history holding up to `capacity` entries
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be greater than 0");
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record the final times of a fully completed run
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::HistoryIncomplete`] unless every task of the
    /// run completed. Polls the run first, so a run that just finished is
    /// accepted without an extra poll by the caller.
    pub fn record_run(&mut self, run: &mut SortRun) -> Result<&HistoryEntry> {
        let snapshot = run.poll();
        if !snapshot.all_completed() {
            return Err(BenchError::history_incomplete(
                snapshot.completed_count(),
                SortAlgorithm::COUNT,
            ));
        }

        let entry = HistoryEntry {
            run_id: snapshot.run_id,
            recorded_at: Utc::now(),
            dataset_size: run.original().len(),
            kind: run.original().kind(),
            times: std::array::from_fn(|i| snapshot.tasks[i].elapsed),
        };
        Ok(self.push(entry))
    }

    /// Append an entry, evicting the oldest ones when full
    ///
    /// A deserialized history may carry a zero capacity or more entries than
    /// it allows; both are brought back within bounds here.
    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        let capacity = self.capacity.max(1);
        while self.entries.len() >= capacity {
            match self.entries.pop_front() {
                Some(evicted) => log::debug!("history full, evicting run {}", evicted.run_id),
                None => break,
            }
        }
        self.entries.push_back(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pretty-printed JSON of the whole history
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PerformanceHistory {
    fn default() -> Self {
        Self::new()
    }
}
