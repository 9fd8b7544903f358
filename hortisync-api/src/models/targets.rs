use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTarget {
    /// Target greenhouse temperature in Celsius
    pub celsius: f64,
}

impl TemperatureTarget {
    pub const MIN: f64 = 10.0;
    pub const MAX: f64 = 40.0;
    pub const STEP: f64 = 0.5;

    /// Clamps into `[MIN, MAX]` and snaps to the nearest `STEP`.
    pub fn new(celsius: f64) -> Self {
        let clamped = if celsius.is_nan() {
            Self::default().celsius
        } else {
            celsius.clamp(Self::MIN, Self::MAX)
        };

        Self {
            celsius: libm::round(clamped / Self::STEP) * Self::STEP,
        }
    }
}

impl Default for TemperatureTarget {
    fn default() -> Self {
        Self { celsius: 24.0 }
    }
}

/// Thresholds consumed by the soil-moisture override of the auto-control rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilMoistureSettings {
    /// Moisture at which irrigation stops (percentage)
    pub target_moisture: f64,
    /// Moisture below which irrigation starts (percentage)
    pub min_moisture: f64,
    /// Upper bound considered healthy (percentage)
    pub max_moisture: f64,
    /// Enables the soil-moisture override
    pub auto_irrigation: bool,
}

impl Default for SoilMoistureSettings {
    fn default() -> Self {
        Self {
            target_moisture: 65.0,
            min_moisture: 30.0,
            max_moisture: 90.0,
            auto_irrigation: true,
        }
    }
}
