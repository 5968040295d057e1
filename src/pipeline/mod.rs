// src/pipeline/mod.rs
//
// The control loop and its outbound surfaces.
//
// Signal flow:
//
//   DetectionSource ──poll──▶ JunctionController ──▶ CycleSnapshot
//                              │ scheduler + aggregator
//                              └──▶ EventBus ──drain──▶ subscribers
//
// The controller owns every stateful piece; subscribers only ever see
// drained ControlEvents and the final StatsSummary.

pub mod controller;
pub mod event_bus;
pub mod stats;

pub use controller::{CycleSnapshot, JunctionController};
pub use event_bus::{ControlEvent, EventBus};
pub use stats::{ControllerStats, StatsSummary};
