// src/metrics/aggregator.rs
//
// Composes the three pure estimators into one LaneMetrics record per lane
// per cycle. No decisions are made here; the scheduler never reads these.

use crate::detection::LaneSample;
use crate::metrics::area::AreaEstimator;
use crate::metrics::emissions::{EmissionRecord, EmissionsEstimator};
use crate::metrics::pollution::PollutionClassifier;
use crate::types::{Config, DensityConfig, DensityLevel, PollutionLevel};
use serde::Serialize;

/// One lane's derived metrics for one cycle. Recomputed fresh every cycle;
/// nothing here survives into the next one.
#[derive(Debug, Clone, Serialize)]
pub struct LaneMetrics {
    pub lane: usize,
    pub vehicle_count: u32,
    pub unused_area_m2: f64,
    pub pollution_level: PollutionLevel,
    pub pollution_rate: f64,
    pub air_quality: String,
    pub recommended_plants: Vec<String>,
    pub reduction_percent: u32,
    pub emissions: EmissionRecord,
    pub mitigated_area_m2: u64,
    pub combined_reduction: u64,
    pub density: DensityLevel,
    pub efficiency_percent: u32,
}

pub struct MetricsAggregator {
    pollution: PollutionClassifier,
    emissions: EmissionsEstimator,
    area: AreaEstimator,
    density: DensityConfig,
}

impl MetricsAggregator {
    pub fn new(config: &Config) -> Self {
        Self {
            pollution: PollutionClassifier::new(config.pollution.clone()),
            emissions: EmissionsEstimator::new(config.emissions.clone()),
            area: AreaEstimator::new(&config.area),
            density: config.density.clone(),
        }
    }

    /// Builds the record for one lane. `count` is the effective count after
    /// any fallback; `sample` is this cycle's fresh measurement and drives
    /// the area figure only; no fresh sample, no fresh area.
    pub fn lane_metrics(
        &self,
        lane: usize,
        count: u32,
        sample: Option<&LaneSample>,
    ) -> LaneMetrics {
        let reading = self.pollution.classify(count);
        let emissions = self.emissions.estimate(count);
        let unused_area_m2 = match sample {
            Some(s) => self.area.unused_m2(s.frame_width, s.frame_height, s.occupied_px),
            None => 0.0,
        };

        // reporting convention: half the unused area, floored, counts as
        // plantable, and the reduction product scales with it
        let mitigated_area_m2 = (unused_area_m2 / 2.0).floor() as u64;
        let combined_reduction = reading.reduction_percent as u64 * mitigated_area_m2;

        LaneMetrics {
            lane,
            vehicle_count: count,
            unused_area_m2,
            pollution_level: reading.level,
            pollution_rate: reading.rate,
            air_quality: reading.air_quality,
            recommended_plants: reading.plants,
            reduction_percent: reading.reduction_percent,
            emissions,
            mitigated_area_m2,
            combined_reduction,
            density: self.density_level(count),
            efficiency_percent: efficiency_percent(count),
        }
    }

    fn density_level(&self, count: u32) -> DensityLevel {
        if count <= self.density.low_max {
            DensityLevel::Low
        } else if count <= self.density.medium_max {
            DensityLevel::Medium
        } else {
            DensityLevel::High
        }
    }
}

/// How freely the lane flows: full marks when empty, minus ten points per
/// queued vehicle, floored at zero.
fn efficiency_percent(count: u32) -> u32 {
    100u64.saturating_sub(10 * count as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::LaneSample;

    fn aggregator() -> MetricsAggregator {
        MetricsAggregator::new(&Config::default())
    }

    fn sample(occupied_px: f64) -> LaneSample {
        LaneSample::new(0, occupied_px, 400, 225)
    }

    #[test]
    fn four_lane_scenario() {
        let agg = aggregator();
        let shared = sample(4000.0);
        let counts = [2u32, 0, 9, 13];

        let records: Vec<LaneMetrics> = counts
            .iter()
            .enumerate()
            .map(|(lane, &c)| agg.lane_metrics(lane, c, Some(&shared)))
            .collect();

        let levels: Vec<PollutionLevel> = records.iter().map(|r| r.pollution_level).collect();
        assert_eq!(
            levels,
            [
                PollutionLevel::Moderate,
                PollutionLevel::Low,
                PollutionLevel::High,
                PollutionLevel::Severe
            ]
        );

        let co2: Vec<f64> = records.iter().map(|r| r.emissions.co2).collect();
        assert_eq!(co2, [240.0, 0.0, 1080.0, 1560.0]);

        // (90_000 - 4_000) * 0.05
        for r in &records {
            assert_eq!(r.unused_area_m2, 4300.0);
            assert_eq!(r.mitigated_area_m2, 2150);
        }

        let combined: Vec<u64> = records.iter().map(|r| r.combined_reduction).collect();
        assert_eq!(combined, [21500, 10750, 43000, 64500]);

        let efficiency: Vec<u32> = records.iter().map(|r| r.efficiency_percent).collect();
        assert_eq!(efficiency, [80, 100, 10, 0]);

        let density: Vec<DensityLevel> = records.iter().map(|r| r.density).collect();
        assert_eq!(
            density,
            [
                DensityLevel::Low,
                DensityLevel::Low,
                DensityLevel::High,
                DensityLevel::High
            ]
        );
    }

    #[test]
    fn density_middle_band() {
        let agg = aggregator();
        let r = agg.lane_metrics(0, 5, None);
        assert_eq!(r.density, DensityLevel::Medium);
        let r = agg.lane_metrics(0, 7, None);
        assert_eq!(r.density, DensityLevel::Medium);
        let r = agg.lane_metrics(0, 8, None);
        assert_eq!(r.density, DensityLevel::High);
    }

    #[test]
    fn missing_sample_still_yields_count_metrics() {
        let agg = aggregator();
        let r = agg.lane_metrics(2, 6, None);
        assert_eq!(r.lane, 2);
        assert_eq!(r.vehicle_count, 6);
        assert_eq!(r.pollution_level, PollutionLevel::High);
        assert_eq!(r.emissions.co2, 720.0);
        // no fresh measurement, no area figure
        assert_eq!(r.unused_area_m2, 0.0);
        assert_eq!(r.mitigated_area_m2, 0);
        assert_eq!(r.combined_reduction, 0);
    }

    #[test]
    fn invalid_dimensions_zero_the_area_only() {
        let agg = aggregator();
        let bad = LaneSample::new(0, 3000.0, 0, 225);
        let r = agg.lane_metrics(1, 4, Some(&bad));
        assert_eq!(r.unused_area_m2, 0.0);
        assert_eq!(r.pollution_level, PollutionLevel::Moderate);
        assert_eq!(r.emissions.co2, 480.0);
    }

    #[test]
    fn record_carries_band_plants_and_rate() {
        let agg = aggregator();
        let r = agg.lane_metrics(3, 13, Some(&sample(0.0)));
        assert_eq!(r.air_quality, "Very Poor");
        assert_eq!(r.reduction_percent, 30);
        assert_eq!(
            r.recommended_plants,
            ["Areca Palm", "Boston Fern", "Rubber Plant"]
        );
        assert_eq!(r.pollution_rate, 2.6);
    }

    #[test]
    fn odd_unused_area_floors_the_mitigated_half() {
        let agg = aggregator();
        // (90_000 - 4_010) * 0.05 = 4_299.5 → half = 2_149.75 → 2_149
        let r = agg.lane_metrics(0, 1, Some(&sample(4010.0)));
        assert_eq!(r.unused_area_m2, 4299.5);
        assert_eq!(r.mitigated_area_m2, 2149);
        assert_eq!(r.combined_reduction, 21490);
    }
}
