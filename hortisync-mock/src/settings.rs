use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use std::env::VarError;
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

use hortisync_api::models::{OperatingMode, SensorField};

use crate::simulate::FieldSpecs;

pub const SETTINGS_ENV: &str = "HORTISYNC_SETTINGS";

const DEFAULT_SETTINGS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/default.toml"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Connection labels displayed by the dashboard. Never dialed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub websocket_port: u16,
    pub mqtt_broker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub mode: OperatingMode,
    pub target_temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub fields: FieldSpecs,
}

impl Simulation {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub dashboard: Dashboard,
    pub control: Control,
    pub simulation: Simulation,
}

impl Settings {
    /// Embedded defaults, replaced by the file named in `HORTISYNC_SETTINGS`
    /// when that variable is set.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::from_env_var(env::var(SETTINGS_ENV))
    }

    fn from_env_var(var: Result<String, VarError>) -> Result<Self, Box<dyn Error>> {
        match var {
            Ok(path) => Self::from_file(&path),
            Err(VarError::NotPresent) => Self::from_toml(DEFAULT_SETTINGS),
            Err(e) => Err(format!("{SETTINGS_ENV}: {e}").into()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, Box<dyn Error>> {
        let path = Self::normalize_path(path)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.simulation.tick_interval_ms == 0 {
            return Err("simulation.tick_interval_ms must be greater than zero".into());
        }

        for field in SensorField::ALL {
            let spec = self.simulation.fields.get(field);

            if !spec.clamp.is_valid() {
                return Err(format!("simulation.fields.{}: min must not exceed max", field.key()).into());
            }
            if !(spec.amplitude >= 0.0 && spec.amplitude.is_finite()) {
                return Err(format!("simulation.fields.{}: amplitude must be a non-negative number", field.key()).into());
            }
        }

        Ok(())
    }

    fn normalize_path(path: &str) -> io::Result<PathBuf> {
        let path_buf = PathBuf::from(path);

        Ok(if path_buf.is_absolute() {
            path_buf
        } else {
            env::current_dir()?.as_path().join(&path_buf)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn test_default_settings_match_builtin_specs() {
        let settings = Settings::from_toml(DEFAULT_SETTINGS).unwrap();

        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.control.mode, OperatingMode::Manual);
        assert_eq!(settings.control.target_temperature, 24.0);
        assert_eq!(settings.simulation.tick_interval(), Duration::from_secs(3));
        assert_eq!(settings.simulation.seed, None);
        assert_eq!(settings.simulation.fields, FieldSpecs::default());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let broken = DEFAULT_SETTINGS.replace(
            "clamp = { policy = \"range\", min = 20.0, max = 90.0 }",
            "clamp = { policy = \"range\", min = 90.0, max = 20.0 }",
        );

        let error = Settings::from_toml(&broken).unwrap_err();
        assert!(error.to_string().contains("soil_moisture"));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let broken = DEFAULT_SETTINGS.replace("tick_interval_ms = 3000", "tick_interval_ms = 0");

        assert!(Settings::from_toml(&broken).is_err());
    }

    #[test]
    fn test_unset_variable_falls_back_to_defaults() {
        let settings = Settings::from_env_var(Err(VarError::NotPresent)).unwrap();

        assert_eq!(settings.simulation.fields, FieldSpecs::default());
    }

    #[test]
    fn test_unreadable_variable_is_an_error() {
        let error = Settings::from_env_var(Err(VarError::NotUnicode(OsString::from("settings.toml")))).unwrap_err();

        assert!(error.to_string().contains(SETTINGS_ENV));
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        assert!(Settings::from_env_var(Ok("no/such/settings.toml".to_string())).is_err());
    }
}
