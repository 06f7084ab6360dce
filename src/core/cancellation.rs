//! Cooperative cancellation for sort workers
//!
//! Sort algorithms never get killed from outside. Each worker holds a
//! [`CancellationToken`] and checks it at bounded intervals inside the
//! algorithm's outer loop; when it trips, the algorithm returns early with
//! [`BenchError::Cancelled`](crate::BenchError::Cancelled) and leaves its
//! private copy partially sorted.
//!
//! Tokens are hierarchical: a run owns a parent token and hands one child
//! token to each task, so cancelling the run stops every worker while a
//! single task can still be cancelled on its own.
//!
//! # Example
//!
//! ```rust
//! use parallel_sort_bench::CancellationToken;
//!
//! let run = CancellationToken::new();
//! let bubble = run.child();
//! let quick = run.child();
//!
//! bubble.cancel();
//! assert!(!quick.is_cancelled());
//!
//! run.cancel();
//! assert!(quick.is_cancelled());
//! ```

use crate::core::{BenchError, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Reason for cancellation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancellationReason {
    /// Explicitly cancelled by the caller
    Manual,
    /// The run exceeded its configured time limit
    Timeout(Duration),
    /// Cancelled because the parent token was cancelled
    ParentCancelled,
    /// The owning run was dropped before its workers finished
    Shutdown,
    /// Custom cancellation reason
    Custom(String),
}

impl std::fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancellationReason::Manual => write!(f, "manually cancelled"),
            CancellationReason::Timeout(d) => write!(f, "time limit of {:?} exceeded", d),
            CancellationReason::ParentCancelled => write!(f, "run was cancelled"),
            CancellationReason::Shutdown => write!(f, "run dropped"),
            CancellationReason::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

struct CancellationTokenInner {
    cancelled: AtomicBool,
    children: RwLock<Vec<Weak<CancellationTokenInner>>>,
    reason: RwLock<Option<CancellationReason>>,
}

impl CancellationTokenInner {
    fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            children: RwLock::new(Vec::new()),
            reason: RwLock::new(None),
        }
    }
}

/// A thread-safe cancellation flag shared between a run and its workers
///
/// Cloning a token shares the same flag. Checking is a single atomic load,
/// cheap enough to call from inside a sorting loop.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<CancellationTokenInner>,
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}

impl CancellationToken {
    /// Create a new cancellation token (not cancelled)
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationTokenInner::new()),
        }
    }

    /// Creates a child token linked to this parent
    ///
    /// The child is cancelled when the parent is. A child of an already
    /// cancelled parent starts out cancelled.
    pub fn child(&self) -> Self {
        let child = CancellationToken::new();

        {
            let mut children = self.inner.children.write();
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }

        if self.is_cancelled() {
            child.cancel_with_reason(CancellationReason::ParentCancelled);
        }

        child
    }

    /// Cancel this token with default reason (Manual)
    pub fn cancel(&self) {
        self.cancel_with_reason(CancellationReason::Manual);
    }

    /// Cancel this token and all of its children
    ///
    /// Idempotent: only the first call records a reason.
    pub fn cancel_with_reason(&self, reason: CancellationReason) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }

        *self.inner.reason.write() = Some(reason);

        let children = self.inner.children.read();
        for child_weak in children.iter() {
            if let Some(child_inner) = child_weak.upgrade() {
                let child_token = CancellationToken { inner: child_inner };
                child_token.cancel_with_reason(CancellationReason::ParentCancelled);
            }
        }
    }

    /// Check if this token has been cancelled
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Returns the cancellation reason (if cancelled)
    pub fn reason(&self) -> Option<CancellationReason> {
        self.inner.reason.read().clone()
    }

    /// Returns an error if cancelled, `Ok(())` otherwise
    ///
    /// Sort loops call this between outer iterations and bail out with `?`.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(self.cancelled_error())
        } else {
            Ok(())
        }
    }

    #[cold]
    fn cancelled_error(&self) -> BenchError {
        let reason = self
            .reason()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        BenchError::cancelled("sort", reason)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cancellation_token_cancel() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());

        // Idempotent
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.reason(), Some(CancellationReason::Manual));
    }

    #[test]
    fn test_cancellation_token_clone_shares_state() {
        let token = CancellationToken::new();
        let clone = token.clone();

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancellation_across_threads() {
        let token = CancellationToken::new();
        let token_clone = token.clone();

        let handle = thread::spawn(move || {
            for _ in 0..100 {
                if token_clone.is_cancelled() {
                    return true;
                }
                thread::sleep(Duration::from_millis(10));
            }
            false
        });

        thread::sleep(Duration::from_millis(50));
        token.cancel();

        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_child_cancelled_with_parent() {
        let parent = CancellationToken::new();
        let child1 = parent.child();
        let child2 = parent.child();

        parent.cancel();

        assert!(child1.is_cancelled());
        assert!(child2.is_cancelled());
        assert_eq!(child1.reason(), Some(CancellationReason::ParentCancelled));
    }

    #[test]
    fn test_child_cancellation_is_independent() {
        let parent = CancellationToken::new();
        let child1 = parent.child();
        let child2 = parent.child();

        child1.cancel();

        assert!(!parent.is_cancelled());
        assert!(child1.is_cancelled());
        assert!(!child2.is_cancelled());
    }

    #[test]
    fn test_child_of_cancelled_parent() {
        let parent = CancellationToken::new();
        parent.cancel();

        let child = parent.child();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_first_reason_wins() {
        let token = CancellationToken::new();
        token.cancel_with_reason(CancellationReason::Shutdown);
        token.cancel_with_reason(CancellationReason::Custom("ignored".to_string()));

        assert_eq!(token.reason(), Some(CancellationReason::Shutdown));
    }

    #[test]
    fn test_check() {
        let token = CancellationToken::new();
        assert!(token.check().is_ok());

        token.cancel_with_reason(CancellationReason::Custom("stop button".to_string()));
        let err = token.check().unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.to_string().contains("stop button"));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(CancellationReason::Manual.to_string(), "manually cancelled");
        assert_eq!(
            CancellationReason::Timeout(Duration::from_secs(5)).to_string(),
            "time limit of 5s exceeded"
        );
        assert_eq!(
            CancellationReason::ParentCancelled.to_string(),
            "run was cancelled"
        );
        assert_eq!(CancellationReason::Shutdown.to_string(), "run dropped");
    }
}
