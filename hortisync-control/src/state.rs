use hortisync_api::models::{
    ActuatorState, OperatingMode, SensorSnapshot, SoilMoistureSettings, TemperatureTarget, Valve,
};

use crate::error::{SettingsError, SourceError};
use crate::rule::{Decision, evaluate};
use crate::schedule::ScheduleBook;
use crate::source::SensorSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// Automatic mode owns the actuators; the request was dropped.
    IgnoredInAutoMode,
}

/// Direct actuator access. Only handed out while in manual mode.
#[derive(Debug)]
pub struct ManualControl<'a> {
    actuators: &'a mut ActuatorState,
}

impl ManualControl<'_> {
    pub fn toggle_valve(&mut self, valve: Valve) {
        let open = self.actuators.valve(valve);
        self.actuators.set_valve(valve, !open);
    }

    pub fn set_valve(&mut self, valve: Valve, open: bool) {
        self.actuators.set_valve(valve, open);
    }

    pub fn set_fan_speed(&mut self, speed: u8) {
        self.actuators.set_fan_speed(speed);
    }
}

/// Everything the dashboard shows, owned in one place.
#[derive(Debug, Clone)]
pub struct Greenhouse {
    snapshot: SensorSnapshot,
    actuators: ActuatorState,
    mode: OperatingMode,
    target: TemperatureTarget,
    soil: SoilMoistureSettings,
    schedules: ScheduleBook,
    last_decision: Option<Decision>,
}

impl Greenhouse {
    pub fn new(snapshot: SensorSnapshot, actuators: ActuatorState) -> Self {
        Self {
            snapshot,
            actuators,
            mode: OperatingMode::Manual,
            target: TemperatureTarget::default(),
            soil: SoilMoistureSettings::default(),
            schedules: ScheduleBook::with_defaults(),
            last_decision: None,
        }
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    pub fn actuators(&self) -> &ActuatorState {
        &self.actuators
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn target(&self) -> TemperatureTarget {
        self.target
    }

    pub fn soil_settings(&self) -> &SoilMoistureSettings {
        &self.soil
    }

    pub fn schedules(&self) -> &ScheduleBook {
        &self.schedules
    }

    pub fn schedules_mut(&mut self) -> &mut ScheduleBook {
        &mut self.schedules
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Pulls a fresh snapshot and, in automatic mode, re-runs the rule.
    ///
    /// The reading keeps the timestamp its source gave it. On a source error
    /// the previous snapshot and actuators stay in place.
    pub fn tick<S>(&mut self, source: &mut S) -> Result<Option<Decision>, SourceError>
    where
        S: SensorSource + ?Sized,
    {
        self.snapshot = source.sample(&self.snapshot)?;

        Ok(self.reevaluate())
    }

    pub fn set_mode(&mut self, mode: OperatingMode) {
        if self.mode == mode {
            return;
        }

        tracing::info!("operating mode {:?} -> {:?}", self.mode, mode);

        self.mode = mode;
        self.reevaluate();
    }

    pub fn toggle_mode(&mut self) -> OperatingMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn manual(&mut self) -> Option<ManualControl<'_>> {
        match self.mode {
            OperatingMode::Manual => Some(ManualControl {
                actuators: &mut self.actuators,
            }),
            OperatingMode::Automatic => None,
        }
    }

    pub fn toggle_valve(&mut self, valve: Valve) -> MutationOutcome {
        self.with_manual(|control| control.toggle_valve(valve))
    }

    pub fn set_valve(&mut self, valve: Valve, open: bool) -> MutationOutcome {
        self.with_manual(|control| control.set_valve(valve, open))
    }

    pub fn set_fan_speed(&mut self, speed: u8) -> MutationOutcome {
        self.with_manual(|control| control.set_fan_speed(speed))
    }

    pub fn set_target_temperature(&mut self, celsius: f64) -> TemperatureTarget {
        self.target = TemperatureTarget::new(celsius);
        self.reevaluate();
        self.target
    }

    pub fn update_soil_settings(&mut self, settings: SoilMoistureSettings) -> Result<(), SettingsError> {
        for value in [settings.min_moisture, settings.target_moisture, settings.max_moisture] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SettingsError::MoistureOutOfRange(value));
            }
        }
        if settings.min_moisture > settings.max_moisture {
            return Err(SettingsError::MoistureOrdering);
        }

        self.soil = settings;
        self.reevaluate();
        Ok(())
    }

    fn with_manual<F>(&mut self, apply: F) -> MutationOutcome
    where
        F: FnOnce(&mut ManualControl<'_>),
    {
        match self.manual() {
            Some(mut control) => {
                apply(&mut control);
                MutationOutcome::Applied
            }
            None => {
                tracing::debug!("ignoring manual actuator change in automatic mode");
                MutationOutcome::IgnoredInAutoMode
            }
        }
    }

    fn reevaluate(&mut self) -> Option<Decision> {
        if !self.mode.is_automatic() {
            return None;
        }

        let decision = evaluate(&self.actuators, &self.snapshot, self.target, &self.soil);
        self.actuators = decision.state;
        self.last_decision = Some(decision);

        Some(decision)
    }
}

impl Default for Greenhouse {
    fn default() -> Self {
        Self::new(SensorSnapshot::default(), ActuatorState::default())
    }
}
