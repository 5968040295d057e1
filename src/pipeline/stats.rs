// src/pipeline/stats.rs
//
// Runtime counters for the control loop. Cheap to clone and share across
// tasks; the summary is what the end-of-run report prints.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ControllerStats {
    pub cycles: Arc<AtomicU64>,
    pub phase_changes: Arc<AtomicU64>,
    pub missing_samples: Arc<AtomicU64>,
    pub rejected_counts: Arc<AtomicU64>,
    pub invalid_dimensions: Arc<AtomicU64>,
    pub summaries_emitted: Arc<AtomicU64>,
    pub events_dropped: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl ControllerStats {
    pub fn new() -> Self {
        Self {
            cycles: Arc::new(AtomicU64::new(0)),
            phase_changes: Arc::new(AtomicU64::new(0)),
            missing_samples: Arc::new(AtomicU64::new(0)),
            rejected_counts: Arc::new(AtomicU64::new(0)),
            invalid_dimensions: Arc::new(AtomicU64::new(0)),
            summaries_emitted: Arc::new(AtomicU64::new(0)),
            events_dropped: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycles_per_sec(&self) -> f64 {
        let cycles = self.cycles.load(Ordering::Relaxed);
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed > 0.01 {
            cycles as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            cycles: self.cycles.load(Ordering::Relaxed),
            cycles_per_sec: self.cycles_per_sec(),
            phase_changes: self.phase_changes.load(Ordering::Relaxed),
            missing_samples: self.missing_samples.load(Ordering::Relaxed),
            rejected_counts: self.rejected_counts.load(Ordering::Relaxed),
            invalid_dimensions: self.invalid_dimensions.load(Ordering::Relaxed),
            summaries_emitted: self.summaries_emitted.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub cycles: u64,
    pub cycles_per_sec: f64,
    pub phase_changes: u64,
    pub missing_samples: u64,
    pub rejected_counts: u64,
    pub invalid_dimensions: u64,
    pub summaries_emitted: u64,
    pub events_dropped: u64,
    pub elapsed_secs: f64,
}
