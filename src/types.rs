use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub junction: JunctionConfig,
    pub detection: DetectionConfig,
    pub area: AreaConfig,
    pub emissions: EmissionsConfig,
    pub pollution: PollutionConfig,
    pub density: DensityConfig,
    pub events: EventConfig,
    pub sim: SimConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JunctionConfig {
    pub lane_count: usize,
    pub min_green_secs: f64,
    pub cycle_interval_ms: u64,
}

impl Default for JunctionConfig {
    fn default() -> Self {
        Self {
            lane_count: 4,
            min_green_secs: 5.0,
            cycle_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub vehicle_classes: Vec<u32>,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl DetectionConfig {
    pub fn is_vehicle(&self, class_id: u32) -> bool {
        self.vehicle_classes.contains(&class_id)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            // COCO ids: car, motorcycle, bus, truck
            vehicle_classes: vec![2, 3, 5, 7],
            frame_width: 400,
            frame_height: 225,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub pixel_to_m2: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self { pixel_to_m2: 0.05 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionsConfig {
    pub co2: f64,
    pub nox: f64,
    pub pm25: f64,
}

impl Default for EmissionsConfig {
    fn default() -> Self {
        // grams emitted per vehicle per km of approach road
        Self {
            co2: 120.0,
            nox: 0.6,
            pm25: 0.005,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionConfig {
    pub moderate_max: u32,
    pub high_max: u32,
    pub rate_per_vehicle: f64,
    pub bands: PollutionBandTable,
}

impl Default for PollutionConfig {
    fn default() -> Self {
        Self {
            moderate_max: 5,
            high_max: 10,
            rate_per_vehicle: 0.2,
            bands: PollutionBandTable::default(),
        }
    }
}

/// Lookup table keyed by pollution level. One band per level; the
/// classifier only decides the level, everything else is read from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionBandTable {
    pub low: PollutionBand,
    pub moderate: PollutionBand,
    pub high: PollutionBand,
    pub severe: PollutionBand,
}

impl PollutionBandTable {
    pub fn band(&self, level: PollutionLevel) -> &PollutionBand {
        match level {
            PollutionLevel::Low => &self.low,
            PollutionLevel::Moderate => &self.moderate,
            PollutionLevel::High => &self.high,
            PollutionLevel::Severe => &self.severe,
        }
    }
}

impl Default for PollutionBandTable {
    fn default() -> Self {
        Self {
            low: PollutionBand::new("Good", 5, &["Lavender", "Aloe Vera", "Snake Plant"]),
            moderate: PollutionBand::new(
                "Moderate",
                10,
                &["Spider Plant", "Peace Lily", "Bamboo Palm"],
            ),
            high: PollutionBand::new("Poor", 20, &["Areca Palm", "Boston Fern", "Rubber Plant"]),
            severe: PollutionBand::new(
                "Very Poor",
                30,
                &["Areca Palm", "Boston Fern", "Rubber Plant"],
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionBand {
    pub air_quality: String,
    pub reduction_percent: u32,
    pub plants: Vec<String>,
}

impl PollutionBand {
    fn new(air_quality: &str, reduction_percent: u32, plants: &[&str]) -> Self {
        Self {
            air_quality: air_quality.to_string(),
            reduction_percent,
            plants: plants.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub low_max: u32,
    pub medium_max: u32,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            low_max: 3,
            medium_max: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub max_pending: usize,
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            max_pending: 64,
            channel_capacity: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub peak_count: u32,
    pub missing_sample_period: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            peak_count: 14,
            missing_sample_period: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Right-of-way state for one lane. Exactly one lane is Green at any
/// observable instant; transitions rebuild the whole vector atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalState {
    Red,
    Green,
}

impl SignalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalState::Red => "red",
            SignalState::Green => "green",
        }
    }

    pub fn is_green(&self) -> bool {
        matches!(self, SignalState::Green)
    }
}

/// Discrete severity of lane traffic, ordered by vehicle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PollutionLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl PollutionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollutionLevel::Low => "Low",
            PollutionLevel::Moderate => "Moderate",
            PollutionLevel::High => "High",
            PollutionLevel::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DensityLevel {
    Low,
    Medium,
    High,
}

impl DensityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityLevel::Low => "LOW",
            DensityLevel::Medium => "MEDIUM",
            DensityLevel::High => "HIGH",
        }
    }
}
