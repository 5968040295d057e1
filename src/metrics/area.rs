// src/metrics/area.rs
//
// Converts a lane frame's occupied pixel area into unused road surface in
// physical units.

use crate::types::AreaConfig;

pub struct AreaEstimator {
    pixel_to_m2: f64,
}

impl AreaEstimator {
    pub fn new(config: &AreaConfig) -> Self {
        Self {
            pixel_to_m2: config.pixel_to_m2,
        }
    }

    /// Unused area of one lane's frame in m². Never negative: degenerate
    /// dimensions short-circuit to 0, and an occupied reading beyond the
    /// frame area (or non-finite) clamps instead of underflowing.
    pub fn unused_m2(&self, frame_width: u32, frame_height: u32, occupied_px: f64) -> f64 {
        if frame_width == 0 || frame_height == 0 {
            return 0.0;
        }
        let total_px = frame_width as f64 * frame_height as f64;
        let occupied = if occupied_px.is_finite() {
            occupied_px.max(0.0)
        } else {
            total_px
        };
        ((total_px - occupied) * self.pixel_to_m2).max(0.0)
    }
}
