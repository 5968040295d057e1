// src/config.rs
//
// Loading and validation of the YAML configuration.

use crate::types::Config;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        let config: Config =
            serde_yaml::from_str(&contents).with_context(|| format!("failed to parse {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to built-in
    /// defaults. A present-but-broken file is still an error.
    pub fn load_or_default(path: &str) -> Result<(Self, ConfigSource)> {
        if Path::new(path).exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.junction.lane_count == 0 {
            bail!("junction.lane_count must be at least 1");
        }
        if self.junction.min_green_secs <= 0.0 {
            bail!("junction.min_green_secs must be positive");
        }
        if self.junction.cycle_interval_ms == 0 {
            bail!("junction.cycle_interval_ms must be positive");
        }
        if self.detection.vehicle_classes.is_empty() {
            bail!("detection.vehicle_classes must not be empty");
        }
        if self.detection.frame_width == 0 || self.detection.frame_height == 0 {
            bail!("detection frame dimensions must be positive");
        }
        if self.area.pixel_to_m2 <= 0.0 {
            bail!("area.pixel_to_m2 must be positive");
        }
        if self.emissions.co2 < 0.0 || self.emissions.nox < 0.0 || self.emissions.pm25 < 0.0 {
            bail!("emission factors must be non-negative");
        }
        if self.pollution.moderate_max >= self.pollution.high_max {
            bail!(
                "pollution.moderate_max ({}) must be below pollution.high_max ({})",
                self.pollution.moderate_max,
                self.pollution.high_max
            );
        }
        if self.pollution.rate_per_vehicle < 0.0 {
            bail!("pollution.rate_per_vehicle must be non-negative");
        }
        if self.density.low_max >= self.density.medium_max {
            bail!(
                "density.low_max ({}) must be below density.medium_max ({})",
                self.density.low_max,
                self.density.medium_max
            );
        }
        if self.events.max_pending == 0 {
            bail!("events.max_pending must be at least 1");
        }
        if self.events.channel_capacity == 0 {
            bail!("events.channel_capacity must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.junction.lane_count, 4);
        assert_eq!(config.junction.min_green_secs, 5.0);
        assert_eq!(config.emissions.co2, 120.0);
        assert_eq!(config.area.pixel_to_m2, 0.05);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = "junction:\n  lane_count: 6\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.junction.lane_count, 6);
        // untouched sections keep reference values
        assert_eq!(config.junction.min_green_secs, 5.0);
        assert_eq!(config.pollution.moderate_max, 5);
        assert_eq!(config.pollution.bands.low.air_quality, "Good");
    }

    #[test]
    fn rejects_zero_lanes() {
        let mut config = Config::default();
        config.junction.lane_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pollution_thresholds() {
        let mut config = Config::default();
        config.pollution.moderate_max = 10;
        config.pollution.high_max = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_density_thresholds() {
        let mut config = Config::default();
        config.density.low_max = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_factors() {
        let mut config = Config::default();
        config.area.pixel_to_m2 = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.emissions.nox = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (config, source) = Config::load_or_default("definitely/not/here.yaml").unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.junction.lane_count, 4);
    }

    #[test]
    fn band_table_lookup_matches_level() {
        use crate::types::PollutionLevel;
        let config = Config::default();
        let table = &config.pollution.bands;
        assert_eq!(table.band(PollutionLevel::Low).reduction_percent, 5);
        assert_eq!(table.band(PollutionLevel::Moderate).reduction_percent, 10);
        assert_eq!(table.band(PollutionLevel::High).reduction_percent, 20);
        assert_eq!(table.band(PollutionLevel::Severe).reduction_percent, 30);
        assert_eq!(table.band(PollutionLevel::Severe).air_quality, "Very Poor");
    }
}
