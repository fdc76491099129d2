//! Per-tick workload accounting.
//!
//! Workload is tick duration over tick budget: 1.0 means the tick used its
//! whole interval, and an overrunning tick records a value above 1.0 rather
//! than triggering any catch-up — skipped time is simply lost.

use std::collections::VecDeque;
use std::time::Duration;

/// How many recent workload samples are retained.
const HISTORY: usize = 100;

/// Ring buffer of recent per-tick workloads.
pub struct TickMetrics {
    interval_ms: f64,
    ticks: u64,
    /// Most recent sample at the front.
    workloads: VecDeque<f32>,
}

impl TickMetrics {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            ticks: 0,
            workloads: VecDeque::with_capacity(HISTORY),
        }
    }

    /// Record one tick's duration; returns its workload fraction.
    pub fn record(&mut self, elapsed: Duration) -> f32 {
        let workload = (elapsed.as_secs_f64() * 1000.0 / self.interval_ms) as f32;
        if self.workloads.len() == HISTORY {
            self.workloads.pop_back();
        }
        self.workloads.push_front(workload);
        self.ticks += 1;
        workload
    }

    /// Ticks recorded so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Workload of the most recent tick (0 before the first).
    pub fn last_workload(&self) -> f32 {
        self.workloads.front().copied().unwrap_or(0.0)
    }

    /// Mean workload over the most recent `n` ticks (capped at history).
    pub fn average_workload(&self, n: usize) -> f32 {
        let take = n.min(self.workloads.len());
        if take == 0 {
            return 0.0;
        }
        self.workloads.iter().take(take).sum::<f32>() / take as f32
    }

    /// Worst single tick among the most recent `n`.
    pub fn max_workload(&self, n: usize) -> f32 {
        self.workloads
            .iter()
            .take(n)
            .copied()
            .fold(0.0, f32::max)
    }
}
