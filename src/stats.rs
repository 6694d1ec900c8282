//! # Stats — Atomic Generation Counters
//!
//! Counters shared between the batch generator and the rayon workers that
//! solve partitions in parallel. Plain atomics with relaxed ordering: they
//! are monotonic tallies read for logging and tests, never used to
//! synchronise anything.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug)]
pub struct GenerationStats {
    pub batches: AtomicU64,
    pub partitions: AtomicU64,
    pub assignments: AtomicU64,
    pub dates: AtomicU64,
    busy_nanos: AtomicU64,
    start: Instant,
}

/// Point-in-time copy of [`GenerationStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub batches: u64,
    pub partitions: u64,
    pub assignments: u64,
    pub dates: u64,
    pub busy_ms: u64,
}

impl GenerationStats {
    pub fn new() -> Self {
        GenerationStats {
            batches: AtomicU64::new(0),
            partitions: AtomicU64::new(0),
            assignments: AtomicU64::new(0),
            dates: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    /// Add wall time spent generating a batch.
    pub fn record_busy(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.busy_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            batches: self.batches.load(Ordering::Relaxed),
            partitions: self.partitions.load(Ordering::Relaxed),
            assignments: self.assignments.load(Ordering::Relaxed),
            dates: self.dates.load(Ordering::Relaxed),
            busy_ms: self.busy_nanos.load(Ordering::Relaxed) / 1_000_000,
        }
    }

    pub fn log_summary(&self) {
        let s = self.snapshot();
        let elapsed = self.start.elapsed();
        let rate = if s.busy_ms > 0 {
            s.dates as f64 * 1000.0 / s.busy_ms as f64
        } else {
            0.0
        };
        info!(
            batches = s.batches,
            partitions = s.partitions,
            assignments = s.assignments,
            dates = s.dates,
            busy_ms = s.busy_ms,
            rate = format_args!("{:.0}", rate),
            uptime = format_args!("{:.3}s", elapsed.as_secs_f64()),
            "generation summary"
        );
    }
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self::new()
    }
}
