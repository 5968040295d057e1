// src/pipeline/event_bus.rs
//
// Decoupled outbound notifications. The control loop publishes; whoever
// drains the bus (announcer task, UI feed, log sink) decides what to do
// with the events. The loop never blocks on a subscriber.

use crate::metrics::LaneMetrics;
use crate::scheduler::PhaseChange;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub enum ControlEvent {
    /// The rotation advanced to a new lane.
    PhaseChanged(PhaseChange),

    /// Metrics digest for the lane that just turned Green. This is the
    /// operator announcement payload; the core only emits it.
    LaneSummary { lane: usize, metrics: LaneMetrics },
}

pub struct EventBus {
    events: VecDeque<ControlEvent>,
    max_pending: usize,
    dropped: u64,
}

impl EventBus {
    pub fn new(max_pending: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_pending),
            max_pending,
            dropped: 0,
        }
    }

    pub fn publish(&mut self, event: ControlEvent) {
        if self.events.len() >= self.max_pending {
            warn!(
                "Event bus full ({} events), dropping oldest",
                self.max_pending
            );
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<ControlEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }

    /// Events lost to overflow since construction.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
