// src/pipeline/controller.rs
//
// The owning control loop. One cycle = poll samples, feed the scheduler,
// derive per-lane metrics, evaluate the rotation, publish events.
// process_cycle is the whole cycle in synchronous, clock-free form; run
// paces it on the runtime clock and forwards events to subscribers.

use crate::detection::{DetectionSource, LaneSample, SampleFault};
use crate::metrics::{LaneMetrics, MetricsAggregator};
use crate::pipeline::event_bus::{ControlEvent, EventBus};
use crate::pipeline::stats::{ControllerStats, StatsSummary};
use crate::scheduler::SignalScheduler;
use crate::types::{Config, SignalState};
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Everything one cycle produces for the outside world.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSnapshot {
    pub cycle: u64,
    pub at_secs: f64,
    pub active_lane: usize,
    pub signals: Vec<SignalState>,
    /// Some only at the active lane's index.
    pub remaining_secs: Vec<Option<u32>>,
    pub metrics: Vec<LaneMetrics>,
}

pub struct JunctionController {
    scheduler: SignalScheduler,
    aggregator: MetricsAggregator,
    bus: EventBus,
    stats: ControllerStats,
    cycle_interval: Duration,
    cycle_seq: u64,
}

impl JunctionController {
    pub fn new(config: &Config, stats: ControllerStats) -> Self {
        Self {
            scheduler: SignalScheduler::new(&config.junction, 0.0),
            aggregator: MetricsAggregator::new(config),
            bus: EventBus::new(config.events.max_pending),
            stats,
            cycle_interval: Duration::from_millis(config.junction.cycle_interval_ms),
            cycle_seq: 0,
        }
    }

    /// Runs one full control cycle against the given timestamp. Sample
    /// faults are logged and counted here, never propagated; the snapshot
    /// is always complete.
    pub fn process_cycle(
        &mut self,
        samples: &[Option<LaneSample>],
        now_secs: f64,
    ) -> CycleSnapshot {
        self.cycle_seq += 1;
        self.stats.inc(&self.stats.cycles);

        let lane_count = self.scheduler.lane_count();

        for lane in 0..lane_count {
            let sample = samples.get(lane).and_then(|s| s.as_ref());

            if let Some(fault) = self.scheduler.observe(lane, sample) {
                warn!(
                    "⚠️  Lane {}: {}, reusing count {}",
                    lane,
                    fault.as_str(),
                    self.scheduler.count(lane)
                );
                match fault {
                    SampleFault::Missing => self.stats.inc(&self.stats.missing_samples),
                    SampleFault::OutOfRangeCount => self.stats.inc(&self.stats.rejected_counts),
                    SampleFault::InvalidDimensions => {}
                }
            }

            if let Some(s) = sample {
                if s.vehicle_count >= 0 && !s.has_valid_dims() {
                    warn!(
                        "⚠️  Lane {}: {} ({}x{}), area reads as zero",
                        lane,
                        SampleFault::InvalidDimensions.as_str(),
                        s.frame_width,
                        s.frame_height
                    );
                    self.stats.inc(&self.stats.invalid_dimensions);
                }
            }
        }

        // Metrics read the effective counts, so a switch below and the
        // summary it publishes see the same numbers.
        let metrics: Vec<LaneMetrics> = (0..lane_count)
            .map(|lane| {
                let sample = samples
                    .get(lane)
                    .and_then(|s| s.as_ref())
                    .filter(|s| s.vehicle_count >= 0);
                self.aggregator
                    .lane_metrics(lane, self.scheduler.count(lane), sample)
            })
            .collect();

        if let Some(change) = self.scheduler.tick(now_secs) {
            self.stats.inc(&self.stats.phase_changes);
            let summary = metrics[change.to_lane].clone();
            self.bus.publish(ControlEvent::PhaseChanged(change));
            self.bus.publish(ControlEvent::LaneSummary {
                lane: summary.lane,
                metrics: summary,
            });
            self.stats.inc(&self.stats.summaries_emitted);
        }

        let remaining_secs: Vec<Option<u32>> = (0..lane_count)
            .map(|lane| self.scheduler.remaining_secs(lane, now_secs))
            .collect();

        CycleSnapshot {
            cycle: self.cycle_seq,
            at_secs: now_secs,
            active_lane: self.scheduler.active_lane(),
            signals: self.scheduler.signals().to_vec(),
            remaining_secs,
            metrics,
        }
    }

    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        self.bus.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.bus.pending_count()
    }

    /// Paces cycles on the runtime clock until the stop signal flips.
    /// Cycle bodies stay atomic; shutdown is only honored at boundaries.
    pub async fn run(
        mut self,
        mut source: impl DetectionSource,
        events_tx: mpsc::Sender<ControlEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> StatsSummary {
        let origin = Instant::now();
        let mut ticker = tokio::time::interval(self.cycle_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let samples = source.poll();
                    let snapshot = self.process_cycle(&samples, origin.elapsed().as_secs_f64());
                    debug!(
                        "Cycle {}: lane {} {}, {}s left",
                        snapshot.cycle,
                        snapshot.active_lane,
                        snapshot.signals[snapshot.active_lane].as_str(),
                        snapshot.remaining_secs[snapshot.active_lane].unwrap_or(0)
                    );
                    for event in self.bus.drain() {
                        if events_tx.try_send(event).is_err() {
                            self.stats.inc(&self.stats.events_dropped);
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        self.stats.summary()
    }
}
