use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hortisync_api::models::{OperatingMode, ScheduleDraft, ScheduleUpdate, SoilMoistureSettings, Valve};
use hortisync_control::{Greenhouse, MutationOutcome, ScheduleError, SettingsError};

/// A user action coming from the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    ToggleValve { valve: Valve },
    SetValve { valve: Valve, open: bool },
    SetFanSpeed { speed: u8 },
    SetTargetTemperature { celsius: f64 },
    SetMode { mode: OperatingMode },
    ToggleMode,
    UpdateSoilSettings { settings: SoilMoistureSettings },
    AddSchedule { draft: ScheduleDraft },
    UpdateSchedule { id: Uuid, update: ScheduleUpdate },
    SetScheduleActive { id: Uuid, active: bool },
    DeleteSchedule { id: Uuid },
}

#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Soil settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Applies one intent. Actuator changes in automatic mode are dropped quietly.
pub fn apply(greenhouse: &mut Greenhouse, intent: Intent) -> Result<(), IntentError> {
    tracing::debug!("apply intent {:?}", intent);

    let outcome = match intent {
        Intent::ToggleValve { valve } => greenhouse.toggle_valve(valve),
        Intent::SetValve { valve, open } => greenhouse.set_valve(valve, open),
        Intent::SetFanSpeed { speed } => greenhouse.set_fan_speed(speed),
        Intent::SetTargetTemperature { celsius } => {
            greenhouse.set_target_temperature(celsius);
            MutationOutcome::Applied
        }
        Intent::SetMode { mode } => {
            greenhouse.set_mode(mode);
            MutationOutcome::Applied
        }
        Intent::ToggleMode => {
            greenhouse.toggle_mode();
            MutationOutcome::Applied
        }
        Intent::UpdateSoilSettings { settings } => {
            greenhouse.update_soil_settings(settings)?;
            MutationOutcome::Applied
        }
        Intent::AddSchedule { draft } => {
            greenhouse.schedules_mut().add(draft)?;
            MutationOutcome::Applied
        }
        Intent::UpdateSchedule { id, update } => {
            greenhouse.schedules_mut().update(id, update)?;
            MutationOutcome::Applied
        }
        Intent::SetScheduleActive { id, active } => {
            greenhouse.schedules_mut().set_active(id, active)?;
            MutationOutcome::Applied
        }
        Intent::DeleteSchedule { id } => {
            greenhouse.schedules_mut().delete(id)?;
            MutationOutcome::Applied
        }
    };

    if outcome == MutationOutcome::IgnoredInAutoMode {
        tracing::debug!("intent ignored while in automatic mode");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use hortisync_api::models::Weekday;

    use super::*;

    #[test]
    fn test_intent_wire_format() {
        let intent: Intent = serde_json::from_str(r#"{"type":"toggle_valve","valve":"primary"}"#).unwrap();
        assert_eq!(intent, Intent::ToggleValve { valve: Valve::Primary });

        let intent: Intent = serde_json::from_str(r#"{"type":"set_mode","mode":"automatic"}"#).unwrap();
        assert_eq!(intent, Intent::SetMode { mode: OperatingMode::Automatic });
    }

    #[test]
    fn test_schedule_intents() {
        let mut greenhouse = Greenhouse::default();
        let draft = ScheduleDraft {
            name: "Morning".to_string(),
            days: [Weekday::Monday].into_iter().collect(),
            ..ScheduleDraft::default()
        };

        apply(&mut greenhouse, Intent::AddSchedule { draft }).unwrap();
        assert_eq!(greenhouse.schedules().len(), 3);

        let id = greenhouse.schedules().list()[2].id;
        apply(&mut greenhouse, Intent::SetScheduleActive { id, active: false }).unwrap();
        assert!(!greenhouse.schedules().get(id).unwrap().active);

        apply(&mut greenhouse, Intent::DeleteSchedule { id }).unwrap();
        assert!(matches!(
            apply(&mut greenhouse, Intent::DeleteSchedule { id }),
            Err(IntentError::Schedule(ScheduleError::NotFound(_)))
        ));
    }

    #[test]
    fn test_update_schedule_intent() {
        let mut greenhouse = Greenhouse::default();
        let id = greenhouse.schedules().list()[0].id;

        let rename = ScheduleUpdate {
            name: Some(" Deep watering ".to_string()),
            duration: Some(240),
            ..ScheduleUpdate::default()
        };
        apply(&mut greenhouse, Intent::UpdateSchedule { id, update: rename }).unwrap();

        let schedule = greenhouse.schedules().get(id).unwrap();
        assert_eq!(schedule.name, "Deep watering");
        assert_eq!(schedule.duration, 240);

        let zero = ScheduleUpdate {
            duration: Some(0),
            ..ScheduleUpdate::default()
        };
        assert!(matches!(
            apply(&mut greenhouse, Intent::UpdateSchedule { id, update: zero }),
            Err(IntentError::Schedule(ScheduleError::ZeroDuration))
        ));
        assert_eq!(greenhouse.schedules().get(id).unwrap().duration, 240);
    }

    #[test]
    fn test_update_soil_settings_intent() {
        let mut greenhouse = Greenhouse::default();

        let drier = SoilMoistureSettings {
            target_moisture: 25.0,
            ..SoilMoistureSettings::default()
        };
        apply(&mut greenhouse, Intent::UpdateSoilSettings { settings: drier }).unwrap();
        assert_eq!(greenhouse.soil_settings(), &drier);

        let inverted = SoilMoistureSettings {
            min_moisture: 95.0,
            ..SoilMoistureSettings::default()
        };
        assert!(matches!(
            apply(&mut greenhouse, Intent::UpdateSoilSettings { settings: inverted }),
            Err(IntentError::Settings(SettingsError::MoistureOrdering))
        ));
        assert_eq!(greenhouse.soil_settings(), &drier);
    }

    #[test]
    fn test_empty_schedule_is_refused() {
        let mut greenhouse = Greenhouse::default();

        let result = apply(&mut greenhouse, Intent::AddSchedule { draft: ScheduleDraft::default() });

        assert!(matches!(result, Err(IntentError::Schedule(ScheduleError::EmptyName))));
        assert_eq!(greenhouse.schedules().len(), 2);
    }

    #[test]
    fn test_valve_intent_ignored_in_auto_mode() {
        let mut greenhouse = Greenhouse::default();
        apply(&mut greenhouse, Intent::ToggleMode).unwrap();
        let before = *greenhouse.actuators();

        apply(&mut greenhouse, Intent::SetValve { valve: Valve::Secondary, open: !before.valve2 }).unwrap();

        assert_eq!(greenhouse.actuators(), &before);
    }
}
