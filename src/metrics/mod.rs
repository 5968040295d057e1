// src/metrics/mod.rs
//
// Per-lane derived metrics, recomputed fresh each control cycle.
//
// Signal flow:
//   vehicle count ──→ pollution (severity band + rate)
//   vehicle count ──→ emissions (linear per-pollutant grams)
//   frame + boxes ──→ area      (unused road surface in m²)
//                      └──────→ aggregator → LaneMetrics
//
// Every piece is a pure estimator; the aggregator only composes them.

pub mod aggregator;
pub mod area;
pub mod emissions;
pub mod pollution;

// Re-exports for ergonomic access from the pipeline and main.rs
pub use aggregator::{LaneMetrics, MetricsAggregator};
pub use area::AreaEstimator;
pub use emissions::{EmissionRecord, EmissionsEstimator, Pollutant};
pub use pollution::{PollutionClassifier, PollutionReading};
