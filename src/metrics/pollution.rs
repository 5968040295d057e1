// src/metrics/pollution.rs
//
// Maps a lane's vehicle count to a discrete pollution severity band, plus
// the air-quality label, plant suggestions, and expected reduction that
// band carries. Thresholds and band contents come from configuration; the
// classifier itself only decides which band a count falls in.

use crate::types::{PollutionConfig, PollutionLevel};
use serde::Serialize;

/// Everything derived from one lane's vehicle count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutionReading {
    pub level: PollutionLevel,
    /// Linear pollution rate, `count * rate_per_vehicle`.
    pub rate: f64,
    pub air_quality: String,
    pub plants: Vec<String>,
    pub reduction_percent: u32,
}

pub struct PollutionClassifier {
    config: PollutionConfig,
}

impl PollutionClassifier {
    pub fn new(config: PollutionConfig) -> Self {
        Self { config }
    }

    /// Band membership. Bands are closed on their upper end: 0 is its own
    /// band, then `1..=moderate_max`, `..=high_max`, and everything above.
    /// Every non-negative count lands in exactly one band.
    pub fn level_for(&self, count: u32) -> PollutionLevel {
        if count == 0 {
            PollutionLevel::Low
        } else if count <= self.config.moderate_max {
            PollutionLevel::Moderate
        } else if count <= self.config.high_max {
            PollutionLevel::High
        } else {
            PollutionLevel::Severe
        }
    }

    pub fn classify(&self, count: u32) -> PollutionReading {
        let level = self.level_for(count);
        let band = self.config.bands.band(level);
        PollutionReading {
            level,
            rate: count as f64 * self.config.rate_per_vehicle,
            air_quality: band.air_quality.clone(),
            plants: band.plants.clone(),
            reduction_percent: band.reduction_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PollutionClassifier {
        PollutionClassifier::new(PollutionConfig::default())
    }

    #[test]
    fn band_boundaries() {
        let c = classifier();
        assert_eq!(c.level_for(0), PollutionLevel::Low);
        assert_eq!(c.level_for(1), PollutionLevel::Moderate);
        assert_eq!(c.level_for(5), PollutionLevel::Moderate);
        assert_eq!(c.level_for(6), PollutionLevel::High);
        assert_eq!(c.level_for(10), PollutionLevel::High);
        assert_eq!(c.level_for(11), PollutionLevel::Severe);
        assert_eq!(c.level_for(250), PollutionLevel::Severe);
    }

    #[test]
    fn severity_never_decreases_with_count() {
        let c = classifier();
        let mut previous = c.level_for(0);
        for count in 1..=40 {
            let level = c.level_for(count);
            assert!(
                level >= previous,
                "severity dropped from {:?} to {:?} at count {}",
                previous,
                level,
                count
            );
            previous = level;
        }
    }

    #[test]
    fn reading_carries_band_contents() {
        let c = classifier();

        let quiet = c.classify(0);
        assert_eq!(quiet.level, PollutionLevel::Low);
        assert_eq!(quiet.air_quality, "Good");
        assert_eq!(quiet.reduction_percent, 5);
        assert_eq!(quiet.plants, ["Lavender", "Aloe Vera", "Snake Plant"]);

        let busy = c.classify(8);
        assert_eq!(busy.level, PollutionLevel::High);
        assert_eq!(busy.air_quality, "Poor");
        assert_eq!(busy.reduction_percent, 20);

        let jammed = c.classify(17);
        assert_eq!(jammed.level, PollutionLevel::Severe);
        assert_eq!(jammed.air_quality, "Very Poor");
        assert_eq!(jammed.reduction_percent, 30);
        assert_eq!(jammed.plants, ["Areca Palm", "Boston Fern", "Rubber Plant"]);
    }

    #[test]
    fn rate_is_linear_in_count() {
        let c = classifier();
        assert_eq!(c.classify(0).rate, 0.0);
        assert_eq!(c.classify(2).rate, 0.4);
        assert_eq!(c.classify(10).rate, 2.0);
    }

    #[test]
    fn custom_thresholds_move_the_bands() {
        let mut config = PollutionConfig::default();
        config.moderate_max = 2;
        config.high_max = 4;
        let c = PollutionClassifier::new(config);
        assert_eq!(c.level_for(2), PollutionLevel::Moderate);
        assert_eq!(c.level_for(3), PollutionLevel::High);
        assert_eq!(c.level_for(5), PollutionLevel::Severe);
    }

    #[test]
    fn classification_is_stateless() {
        let c = classifier();
        assert_eq!(c.classify(7), c.classify(7));
    }
}
