//! Rule-based auto-control of the valves and the fan.
//!
//! The rule is a pure function of the previous actuator state, the latest
//! snapshot and the targets. Valves move only when the temperature leaves the
//! hysteresis band; the fan speed is recomputed from scratch every time.

use hortisync_api::models::{ActuatorState, SensorSnapshot, SoilMoistureSettings, TemperatureTarget};
use serde::{Deserialize, Serialize};

/// Half width of the dead zone around the target temperature.
pub const VALVE_HYSTERESIS: f64 = 2.0;

/// Wind speed above which the fan is capped.
pub const WIND_SAFETY_LIMIT: f64 = 15.0;

pub const WIND_FAN_CAP: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValveAction {
    /// Too warm: both valves opened for cooling
    OpenBoth,
    /// Too cold: both valves closed
    CloseBoth,
    /// Inside the hysteresis band
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanTier {
    High,
    Raised,
    Default,
    Reduced,
    Low,
}

impl FanTier {
    pub fn from_temperature_diff(temp_diff: f64) -> Self {
        if temp_diff > 3.0 {
            FanTier::High
        } else if temp_diff > 1.0 {
            FanTier::Raised
        } else if temp_diff < -3.0 {
            FanTier::Low
        } else if temp_diff < -1.0 {
            FanTier::Reduced
        } else {
            FanTier::Default
        }
    }

    pub fn speed(&self) -> u8 {
        match self {
            FanTier::High => 80,
            FanTier::Raised => 60,
            FanTier::Default => 45,
            FanTier::Reduced => 30,
            FanTier::Low => 20,
        }
    }
}

/// Outcome of one rule evaluation, with the branches that fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub state: ActuatorState,
    pub temp_diff: f64,
    pub valve_action: ValveAction,
    /// `Some(open)` when the soil-moisture check forced valve1
    pub moisture_override: Option<bool>,
    pub fan_tier: FanTier,
    pub wind_capped: bool,
}

pub fn evaluate(
    previous: &ActuatorState,
    snapshot: &SensorSnapshot,
    target: TemperatureTarget,
    soil: &SoilMoistureSettings,
) -> Decision {
    let temp_diff = snapshot.temperature - target.celsius;
    let mut state = *previous;

    let valve_action = if temp_diff > VALVE_HYSTERESIS {
        ValveAction::OpenBoth
    } else if temp_diff < -VALVE_HYSTERESIS {
        ValveAction::CloseBoth
    } else {
        ValveAction::Hold
    };

    match valve_action {
        ValveAction::OpenBoth => {
            state.valve1 = true;
            state.valve2 = true;
        }
        ValveAction::CloseBoth => {
            state.valve1 = false;
            state.valve2 = false;
        }
        ValveAction::Hold => {}
    }

    // Moisture need wins over temperature for the primary valve. Reaching the
    // target closes it even when the target sits below the minimum.
    let moisture_override = if !soil.auto_irrigation {
        None
    } else if snapshot.soil_moisture >= soil.target_moisture {
        Some(false)
    } else if snapshot.soil_moisture < soil.min_moisture {
        Some(true)
    } else {
        None
    };

    if let Some(open) = moisture_override {
        state.valve1 = open;
    }

    let fan_tier = FanTier::from_temperature_diff(temp_diff);
    let wind_capped = snapshot.wind_speed > WIND_SAFETY_LIMIT;

    state.fan_speed = if wind_capped {
        fan_tier.speed().min(WIND_FAN_CAP)
    } else {
        fan_tier.speed()
    };

    Decision {
        state,
        temp_diff,
        valve_action,
        moisture_override,
        fan_tier,
        wind_capped,
    }
}
