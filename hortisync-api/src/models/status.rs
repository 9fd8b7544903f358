use serde::{Deserialize, Serialize};

use super::SoilMoistureSettings;

/// How close the greenhouse is to its target temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureStatus {
    Optimal,
    NearTarget,
    FarFromTarget,
}

impl TemperatureStatus {
    pub fn classify(current: f64, target: f64) -> Self {
        let diff = libm::fabs(current - target);

        if diff <= 1.0 {
            TemperatureStatus::Optimal
        } else if diff <= 3.0 {
            TemperatureStatus::NearTarget
        } else {
            TemperatureStatus::FarFromTarget
        }
    }
}

/// Absolute health of a temperature reading, independent of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeStatus {
    Optimal,
    Warning,
    Critical,
}

impl GaugeStatus {
    pub fn classify(celsius: f64) -> Self {
        if !(10.0..=40.0).contains(&celsius) {
            GaugeStatus::Critical
        } else if !(15.0..=35.0).contains(&celsius) {
            GaugeStatus::Warning
        } else {
            GaugeStatus::Optimal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureStatus {
    Low,
    Warning,
    Normal,
}

impl PressureStatus {
    pub fn classify(bar: f64) -> Self {
        if bar < 0.5 {
            PressureStatus::Low
        } else if bar >= 1.0 {
            PressureStatus::Normal
        } else {
            PressureStatus::Warning
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureStatus {
    CriticallyLow,
    TooHigh,
    Optimal,
    NearTarget,
    FarFromTarget,
}

impl MoistureStatus {
    pub fn classify(current: f64, settings: &SoilMoistureSettings) -> Self {
        let diff = libm::fabs(current - settings.target_moisture);

        if current < settings.min_moisture {
            MoistureStatus::CriticallyLow
        } else if current > settings.max_moisture {
            MoistureStatus::TooHigh
        } else if diff <= 5.0 {
            MoistureStatus::Optimal
        } else if diff <= 15.0 {
            MoistureStatus::NearTarget
        } else {
            MoistureStatus::FarFromTarget
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_status_bands() {
        assert_eq!(TemperatureStatus::classify(24.0, 24.0), TemperatureStatus::Optimal);
        assert_eq!(TemperatureStatus::classify(25.0, 24.0), TemperatureStatus::Optimal);
        assert_eq!(TemperatureStatus::classify(21.5, 24.0), TemperatureStatus::NearTarget);
        assert_eq!(TemperatureStatus::classify(28.0, 24.0), TemperatureStatus::FarFromTarget);
    }

    #[test]
    fn test_gauge_status_bands() {
        assert_eq!(GaugeStatus::classify(9.9), GaugeStatus::Critical);
        assert_eq!(GaugeStatus::classify(40.1), GaugeStatus::Critical);
        assert_eq!(GaugeStatus::classify(12.0), GaugeStatus::Warning);
        assert_eq!(GaugeStatus::classify(36.0), GaugeStatus::Warning);
        assert_eq!(GaugeStatus::classify(22.0), GaugeStatus::Optimal);
    }

    #[test]
    fn test_pressure_status_bands() {
        assert_eq!(PressureStatus::classify(0.4), PressureStatus::Low);
        assert_eq!(PressureStatus::classify(0.7), PressureStatus::Warning);
        assert_eq!(PressureStatus::classify(1.0), PressureStatus::Normal);
    }

    #[test]
    fn test_moisture_status_bands() {
        let settings = SoilMoistureSettings::default();

        assert_eq!(MoistureStatus::classify(25.0, &settings), MoistureStatus::CriticallyLow);
        assert_eq!(MoistureStatus::classify(95.0, &settings), MoistureStatus::TooHigh);
        assert_eq!(MoistureStatus::classify(62.0, &settings), MoistureStatus::Optimal);
        assert_eq!(MoistureStatus::classify(55.0, &settings), MoistureStatus::NearTarget);
        assert_eq!(MoistureStatus::classify(35.0, &settings), MoistureStatus::FarFromTarget);
    }
}
