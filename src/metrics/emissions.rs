// src/metrics/emissions.rs
//
// Linear per-vehicle emission estimate for a fixed pollutant set.

use crate::types::EmissionsConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pollutant {
    Co2,
    Nox,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::Co2, Pollutant::Nox, Pollutant::Pm25];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::Co2 => "CO2",
            Pollutant::Nox => "NOx",
            Pollutant::Pm25 => "PM2.5",
        }
    }
}

/// Grams of each pollutant attributed to one lane for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub co2: f64,
    pub nox: f64,
    pub pm25: f64,
}

impl EmissionRecord {
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co2 => self.co2,
            Pollutant::Nox => self.nox,
            Pollutant::Pm25 => self.pm25,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}

pub struct EmissionsEstimator {
    factors: EmissionsConfig,
}

impl EmissionsEstimator {
    pub fn new(factors: EmissionsConfig) -> Self {
        Self { factors }
    }

    pub fn estimate(&self, count: u32) -> EmissionRecord {
        let n = count as f64;
        EmissionRecord {
            co2: n * self.factors.co2,
            nox: n * self.factors.nox,
            pm25: n * self.factors.pm25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> EmissionsEstimator {
        EmissionsEstimator::new(EmissionsConfig::default())
    }

    #[test]
    fn quantities_scale_linearly() {
        let e = estimator();

        let two = e.estimate(2);
        assert_eq!(two.co2, 240.0);
        assert_eq!(two.nox, 1.2);
        assert_eq!(two.pm25, 0.01);

        let nine = e.estimate(9);
        assert_eq!(nine.co2, 1080.0);
        assert!((nine.nox - 5.4).abs() < 1e-9);
        assert!((nine.pm25 - 0.045).abs() < 1e-9);

        let thirteen = e.estimate(13);
        assert_eq!(thirteen.co2, 1560.0);
    }

    #[test]
    fn empty_lane_emits_nothing() {
        let record = estimator().estimate(0);
        assert_eq!(record.co2, 0.0);
        assert_eq!(record.nox, 0.0);
        assert_eq!(record.pm25, 0.0);
    }

    #[test]
    fn record_is_addressable_by_symbol() {
        let record = estimator().estimate(3);
        assert_eq!(record.get(Pollutant::Co2), 360.0);
        assert_eq!(record.get(Pollutant::Nox), record.nox);

        let symbols: Vec<&str> = record.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(symbols, ["CO2", "NOx", "PM2.5"]);
    }

    #[test]
    fn estimate_is_stateless() {
        let e = estimator();
        assert_eq!(e.estimate(6), e.estimate(6));
    }

    #[test]
    fn custom_factors_apply() {
        let e = EmissionsEstimator::new(EmissionsConfig {
            co2: 100.0,
            nox: 1.0,
            pm25: 0.5,
        });
        let record = e.estimate(4);
        assert_eq!(record.co2, 400.0);
        assert_eq!(record.nox, 4.0);
        assert_eq!(record.pm25, 2.0);
    }
}
