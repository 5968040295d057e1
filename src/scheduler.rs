// src/scheduler.rs
//
// Round-robin signal rotation sized by demand. One lane holds Green at a
// time; when its window runs out, the next lane by index takes over with a
// window sized from that lane's current vehicle count. Demand influences
// duration only, never the rotation order, so no lane can be starved.

use crate::detection::{LaneSample, SampleFault};
use crate::types::{JunctionConfig, SignalState};
use serde::Serialize;
use tracing::info;

/// Emitted once per lane switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseChange {
    pub from_lane: usize,
    pub to_lane: usize,
    pub allocated_secs: f64,
    /// The count that sized the new window, observed this same cycle.
    pub vehicle_count: u32,
    pub at_secs: f64,
    pub phase_seq: u64,
}

pub struct SignalScheduler {
    lane_count: usize,
    min_green_secs: f64,

    // Rotation state
    active_lane: usize,
    allocated_secs: f64,
    phase_started_at: f64,
    phase_seq: u64,

    // Last-known-good count per lane; the fallback when a cycle's sample
    // is missing or rejected
    counts: Vec<u32>,
    signals: Vec<SignalState>,
}

impl SignalScheduler {
    /// Lane 0 starts Green with the minimum window. Timestamps are plain
    /// seconds against whatever monotonic origin the caller picks.
    pub fn new(config: &JunctionConfig, now_secs: f64) -> Self {
        let mut signals = vec![SignalState::Red; config.lane_count];
        signals[0] = SignalState::Green;
        Self {
            lane_count: config.lane_count,
            min_green_secs: config.min_green_secs,
            active_lane: 0,
            allocated_secs: config.min_green_secs,
            phase_started_at: now_secs,
            phase_seq: 0,
            counts: vec![0; config.lane_count],
            signals,
        }
    }

    /// Feeds one lane's sample for the current cycle. A missing or
    /// out-of-range sample keeps the lane's previous count and hands the
    /// fault back for the caller to log and account.
    pub fn observe(&mut self, lane: usize, sample: Option<&LaneSample>) -> Option<SampleFault> {
        match sample {
            None => Some(SampleFault::Missing),
            Some(s) if s.vehicle_count < 0 => Some(SampleFault::OutOfRangeCount),
            Some(s) => {
                self.counts[lane] = s.vehicle_count as u32;
                None
            }
        }
    }

    /// Evaluates the transition rule once. Call after this cycle's
    /// `observe` calls, so a switch sizes the new window from the same
    /// cycle's counts.
    pub fn tick(&mut self, now_secs: f64) -> Option<PhaseChange> {
        let elapsed = now_secs - self.phase_started_at;
        if elapsed < self.allocated_secs {
            return None;
        }

        let from_lane = self.active_lane;
        self.active_lane = (self.active_lane + 1) % self.lane_count;
        let vehicle_count = self.counts[self.active_lane];
        self.allocated_secs = self.min_green_secs.max(vehicle_count as f64);
        self.phase_started_at = now_secs;
        self.phase_seq += 1;

        for state in &mut self.signals {
            *state = SignalState::Red;
        }
        self.signals[self.active_lane] = SignalState::Green;

        info!(
            "🟢 Lane {} green for {:.0}s ({} vehicle(s) waiting)",
            self.active_lane, self.allocated_secs, vehicle_count
        );

        Some(PhaseChange {
            from_lane,
            to_lane: self.active_lane,
            allocated_secs: self.allocated_secs,
            vehicle_count,
            at_secs: now_secs,
            phase_seq: self.phase_seq,
        })
    }

    /// Whole seconds left of the active lane's window, rounded up and
    /// clamped at zero. Red lanes have no remaining time.
    pub fn remaining_secs(&self, lane: usize, now_secs: f64) -> Option<u32> {
        if lane != self.active_lane {
            return None;
        }
        let left = self.allocated_secs - (now_secs - self.phase_started_at);
        Some(left.max(0.0).ceil() as u32)
    }

    pub fn signals(&self) -> &[SignalState] {
        &self.signals
    }

    pub fn active_lane(&self) -> usize {
        self.active_lane
    }

    pub fn allocated_secs(&self) -> f64 {
        self.allocated_secs
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// The lane's effective count: last valid observation, 0 before any.
    pub fn count(&self, lane: usize) -> u32 {
        self.counts[lane]
    }
}
