//! The sort algorithm library
//!
//! Four in-place comparison sorts share one contract: the output has the
//! same length and multiset of values as the input, in non-decreasing
//! order for the element kind. Each algorithm is written once over
//! `T: PartialOrd` and monomorphized for `i64`, `f64`, `char` and `String`,
//! which gives the sixteen kind-specific bodies. [`SortAlgorithm::sort_dataset`]
//! is the single place where a dataset's kind is matched to its payload.
//!
//! Every algorithm takes a [`CancellationToken`] and checks it at bounded
//! intervals of its outer loop. A tripped token makes the sort return
//! [`BenchError::Cancelled`](crate::BenchError::Cancelled) with the data
//! left partially sorted.

pub mod bubble;
pub mod insertion;
pub mod quick;
pub mod shell;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use quick::quick_sort;
pub use shell::shell_sort;

use crate::core::{BenchError, CancellationToken, Result};
use crate::data::TypedDataset;
use serde::{Deserialize, Serialize};

/// Outer-loop iterations between two cancellation checks
pub(crate) const CANCEL_CHECK_INTERVAL: usize = 1024;

/// The algorithms a benchmark run races against each other
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    /// Adjacent-swap sort with early exit
    Bubble,
    /// Sorted-prefix insertion
    Insertion,
    /// Gapped insertion over a halving gap sequence
    Shell,
    /// Lomuto partition-exchange
    Quick,
}

impl SortAlgorithm {
    /// Number of algorithms in the library
    pub const COUNT: usize = 4;

    /// Every algorithm, in task order
    pub const ALL: [SortAlgorithm; Self::COUNT] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Shell,
        SortAlgorithm::Quick,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Shell => "Shell Sort",
            SortAlgorithm::Quick => "Quick Sort",
        }
    }

    /// Position of this algorithm in [`SortAlgorithm::ALL`]
    pub fn index(&self) -> usize {
        match self {
            SortAlgorithm::Bubble => 0,
            SortAlgorithm::Insertion => 1,
            SortAlgorithm::Shell => 2,
            SortAlgorithm::Quick => 3,
        }
    }

    /// Algorithm at `index`
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidAlgorithmIndex`] if `index >= COUNT`.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| BenchError::invalid_algorithm_index(index, Self::COUNT))
    }

    /// Sort a slice in place with this algorithm
    pub fn sort_slice<T: PartialOrd>(&self, data: &mut [T], token: &CancellationToken) -> Result<()> {
        match self {
            SortAlgorithm::Bubble => bubble_sort(data, token),
            SortAlgorithm::Insertion => insertion_sort(data, token),
            SortAlgorithm::Shell => shell_sort(data, token),
            SortAlgorithm::Quick => quick_sort(data, token),
        }
    }

    /// Sort a dataset's payload in place, dispatching on its kind
    pub fn sort_dataset(&self, dataset: &mut TypedDataset, token: &CancellationToken) -> Result<()> {
        match dataset {
            TypedDataset::Int64(values) => self.sort_slice(values, token),
            TypedDataset::Float64(values) => self.sort_slice(values, token),
            TypedDataset::Char(values) => self.sort_slice(values, token),
            TypedDataset::String(values) => self.sort_slice(values, token),
        }
    }
}

impl std::fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// True if no adjacent pair is out of order
///
/// Slices of length 0 or 1 are sorted.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| !(w[0] > w[1]))
}
