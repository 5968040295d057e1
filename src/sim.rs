// src/sim.rs
//
// Deterministic detection feed for running the controller without camera
// hardware. Traffic follows a per-lane sine wave with seeded jitter, so
// demand shifts around the junction and every run with the same seed
// replays the same stream. One lane's sample is withheld on a fixed
// schedule to exercise the fallback path.

use crate::detection::{coverage_area, BoundingBox, DetectionSource, LaneSample};
use crate::types::{Config, DetectionConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct SimulatedFeed {
    rng: ChaCha8Rng,
    detection: DetectionConfig,
    lane_count: usize,
    peak_count: u32,
    missing_sample_period: u64,
    cycle: u64,
}

impl SimulatedFeed {
    pub fn new(config: &Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.sim.seed),
            detection: config.detection.clone(),
            lane_count: config.junction.lane_count,
            peak_count: config.sim.peak_count,
            missing_sample_period: config.sim.missing_sample_period,
            cycle: 0,
        }
    }

    /// Which lane, if any, produces no sample this cycle. Rotates through
    /// the lanes, one dropout every `missing_sample_period` cycles.
    fn withheld_lane(&self) -> Option<usize> {
        if self.missing_sample_period == 0 || self.cycle % self.missing_sample_period != 0 {
            return None;
        }
        Some((self.cycle / self.missing_sample_period) as usize % self.lane_count)
    }

    fn lane_sample(&mut self, lane: usize) -> LaneSample {
        let phase = lane as f64 * std::f64::consts::FRAC_PI_2;
        let wave = (self.cycle as f64 * 0.05 + phase).sin();
        let base = (self.peak_count as f64 / 2.0) * (1.0 + wave);
        let jitter = self.rng.gen_range(-1i32..=1);
        let target = (base.round() as i32 + jitter).max(0) as usize;

        let width = self.detection.frame_width as f32;
        let height = self.detection.frame_height as f32;
        let mut detections: Vec<(u32, BoundingBox)> = Vec::with_capacity(target + 1);
        for _ in 0..target {
            let box_w = self.rng.gen_range(24.0f32..56.0);
            let box_h = self.rng.gen_range(16.0f32..36.0);
            let x1 = self.rng.gen_range(0.0f32..(width - box_w).max(1.0));
            let y1 = self.rng.gen_range(0.0f32..(height - box_h).max(1.0));
            let class_idx = self.rng.gen_range(0..self.detection.vehicle_classes.len());
            let class_id = self.detection.vehicle_classes[class_idx];
            detections.push((class_id, BoundingBox::new(x1, y1, x1 + box_w, y1 + box_h)));
        }

        // a pedestrian wanders through now and then; never counted
        if self.rng.gen_range(0..5) == 0 {
            let x1 = self.rng.gen_range(0.0f32..(width - 20.0).max(1.0));
            let y1 = self.rng.gen_range(0.0f32..(height - 40.0).max(1.0));
            detections.push((0, BoundingBox::new(x1, y1, x1 + 18.0, y1 + 38.0)));
        }

        let vehicle_boxes: Vec<BoundingBox> = detections
            .iter()
            .filter(|(class_id, _)| self.detection.is_vehicle(*class_id))
            .map(|(_, b)| *b)
            .collect();
        let occupied = coverage_area(
            &vehicle_boxes,
            self.detection.frame_width,
            self.detection.frame_height,
        );

        LaneSample::new(
            vehicle_boxes.len() as i32,
            occupied,
            self.detection.frame_width,
            self.detection.frame_height,
        )
    }
}

impl DetectionSource for SimulatedFeed {
    fn poll(&mut self) -> Vec<Option<LaneSample>> {
        self.cycle += 1;
        let withheld = self.withheld_lane();
        (0..self.lane_count)
            .map(|lane| {
                if withheld == Some(lane) {
                    None
                } else {
                    Some(self.lane_sample(lane))
                }
            })
            .collect()
    }
}
