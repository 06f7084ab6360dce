//! Parallel benchmark runs
//!
//! A [`SortRun`] deep-copies one dataset four times and starts one worker
//! thread per [`SortAlgorithm`](crate::SortAlgorithm). The caller drives it
//! by polling: [`SortRun::poll`] never blocks and reports, for each task,
//! whether it is running or done and how long it has taken so far.
//!
//! ```text
//!            start()                 every task terminal
//!   (no run) ───────► Running ─────────────────────────► Completed
//!                        │
//!                        │ cancel() / time limit
//!                        ▼
//!                    Cancelled
//! ```
//!
//! Cancelling only asks workers to stop and freezes their timers. Each
//! worker settles its own task: a sort that already finished is published
//! as completed, one that observed its token ends cancelled.

mod config;
mod run;
mod task;
mod worker;

pub use config::EngineConfig;
pub use run::{RunSnapshot, RunState, SortRun};
pub use task::{TaskProgress, TaskState};
