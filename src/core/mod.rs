//! Core types shared by the whole engine

pub mod cancellation;
pub mod error;
pub mod timing;

pub use cancellation::{CancellationReason, CancellationToken};
pub use error::{BenchError, Result};
pub use timing::{format_duration, format_elapsed};
