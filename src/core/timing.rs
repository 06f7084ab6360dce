//! Monotonic clock sampling and human-readable durations

use std::time::{Duration, Instant};

/// Placeholder shown for negative or non-finite durations
pub const DURATION_PLACEHOLDER: &str = "-";

/// Sample the monotonic clock
///
/// `Instant` is unaffected by wall-clock adjustments and has at least
/// microsecond resolution on every supported platform.
#[inline]
pub fn now() -> Instant {
    Instant::now()
}

/// Seconds elapsed since `start`, as a float
#[inline]
pub fn elapsed_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

/// Format a duration given in seconds, picking the unit by magnitude
///
/// | range          | output           |
/// |----------------|------------------|
/// | >= 1 h         | `1.50 h`         |
/// | >= 1 min       | `1 min 5.2 s`    |
/// | >= 1 s         | `2.345 s`        |
/// | >= 1 ms        | `2.50 ms`        |
/// | >= 1 µs        | `12.3 µs`        |
/// | below          | `450.00 ns`      |
///
/// Negative and non-finite inputs format as [`DURATION_PLACEHOLDER`].
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return DURATION_PLACEHOLDER.to_string();
    }

    if seconds >= 3600.0 {
        format!("{:.2} h", seconds / 3600.0)
    } else if seconds >= 60.0 {
        // round to tenths first so 59.96 s carries into the next minute
        let tenths = (seconds * 10.0).round() as u64;
        if tenths >= 36_000 {
            format!("{:.2} h", seconds / 3600.0)
        } else {
            format!("{} min {:.1} s", tenths / 600, (tenths % 600) as f64 / 10.0)
        }
    } else if seconds >= 1.0 {
        format!("{:.3} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.2} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.1} µs", seconds * 1e6)
    } else {
        format!("{:.2} ns", seconds * 1e9)
    }
}

/// [`format_duration`] for a [`Duration`]
pub fn format_elapsed(elapsed: Duration) -> String {
    format_duration(elapsed.as_secs_f64())
}
