use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valve {
    /// Main irrigation valve (valve1)
    Primary,
    /// Secondary valve (valve2)
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorState {
    /// Primary valve open
    pub valve1: bool,
    /// Secondary valve open
    pub valve2: bool,
    /// Fan speed percentage (0-100)
    pub fan_speed: u8,
}

impl ActuatorState {
    pub const MAX_FAN_SPEED: u8 = 100;

    pub fn valve(&self, valve: Valve) -> bool {
        match valve {
            Valve::Primary => self.valve1,
            Valve::Secondary => self.valve2,
        }
    }

    pub fn set_valve(&mut self, valve: Valve, open: bool) {
        match valve {
            Valve::Primary => self.valve1 = open,
            Valve::Secondary => self.valve2 = open,
        }
    }

    pub fn set_fan_speed(&mut self, speed: u8) {
        self.fan_speed = speed.min(Self::MAX_FAN_SPEED);
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self {
            valve1: false,
            valve2: true,
            fan_speed: 45,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// User toggles drive the actuators
    #[default]
    Manual,
    /// The auto-control rule drives the actuators
    Automatic,
}

impl OperatingMode {
    pub fn is_automatic(&self) -> bool {
        matches!(self, OperatingMode::Automatic)
    }

    pub fn toggled(&self) -> Self {
        match self {
            OperatingMode::Manual => OperatingMode::Automatic,
            OperatingMode::Automatic => OperatingMode::Manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_speed_is_capped() {
        let mut state = ActuatorState::default();
        state.set_fan_speed(250);
        assert_eq!(state.fan_speed, 100);
    }

    #[test]
    fn test_valve_accessors() {
        let mut state = ActuatorState::default();
        state.set_valve(Valve::Primary, true);
        state.set_valve(Valve::Secondary, false);

        assert!(state.valve(Valve::Primary));
        assert!(!state.valve(Valve::Secondary));
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(OperatingMode::default(), OperatingMode::Manual);
        assert_eq!(OperatingMode::Manual.toggled(), OperatingMode::Automatic);
        assert!(!OperatingMode::Automatic.toggled().is_automatic());
    }
}
