//! Progress Checkpoints
//!
//! Long scans log a line every `progress_interval` candidates. Both
//! backends only know running totals, so a line is due whenever a total
//! moves across a multiple of the interval.

/// Default candidates between progress lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1 << 24;

/// True when going from `before` to `after` scanned candidates passes a
/// multiple of `interval`. An interval of zero disables progress.
#[inline]
pub fn checkpoint_crossed(interval: u64, before: u64, after: u64) -> bool {
    interval != 0 && before / interval != after / interval
}

/// Share of `total` that `done` represents, in percent.
#[inline]
pub fn percent(done: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    done as f64 / total as f64 * 100.0
}
