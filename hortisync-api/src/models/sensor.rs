use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Names every reading carried by a [`SensorSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorField {
    /// Greenhouse air temperature
    Temperature,
    /// Outside air temperature
    ExternalTemperature,
    /// Incubator chamber temperature
    IncubatorTemperature,
    /// Water line pressure
    Pressure,
    /// Soil moisture
    SoilMoisture,
    /// Wind speed
    WindSpeed,
    /// Light intensity
    LightIntensity,
    /// CO2 saturation
    Co2Saturation,
}

impl SensorField {
    pub const ALL: [SensorField; 8] = [
        SensorField::Temperature,
        SensorField::ExternalTemperature,
        SensorField::IncubatorTemperature,
        SensorField::Pressure,
        SensorField::SoilMoisture,
        SensorField::WindSpeed,
        SensorField::LightIntensity,
        SensorField::Co2Saturation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SensorField::Temperature => "temperature",
            SensorField::ExternalTemperature => "external_temperature",
            SensorField::IncubatorTemperature => "incubator_temperature",
            SensorField::Pressure => "pressure",
            SensorField::SoilMoisture => "soil_moisture",
            SensorField::WindSpeed => "wind_speed",
            SensorField::LightIntensity => "light_intensity",
            SensorField::Co2Saturation => "co2_saturation",
        }
    }
}

/// Latest set of readings. Only one snapshot exists at a time; every tick
/// replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Greenhouse air temperature in Celsius
    pub temperature: f64,
    /// Outside air temperature in Celsius
    pub external_temperature: f64,
    /// Incubator chamber temperature in Celsius
    pub incubator_temperature: f64,
    /// Water line pressure in bar
    pub pressure: f64,
    /// Soil moisture percentage (0-100)
    pub soil_moisture: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Light intensity in lux
    pub light_intensity: f64,
    /// CO2 saturation in ppm
    pub co2_saturation: f64,
    /// Reading time
    pub taken_at: OffsetDateTime,
}

impl SensorSnapshot {
    pub fn get(&self, field: SensorField) -> f64 {
        match field {
            SensorField::Temperature => self.temperature,
            SensorField::ExternalTemperature => self.external_temperature,
            SensorField::IncubatorTemperature => self.incubator_temperature,
            SensorField::Pressure => self.pressure,
            SensorField::SoilMoisture => self.soil_moisture,
            SensorField::WindSpeed => self.wind_speed,
            SensorField::LightIntensity => self.light_intensity,
            SensorField::Co2Saturation => self.co2_saturation,
        }
    }

    pub fn set(&mut self, field: SensorField, value: f64) {
        let slot = match field {
            SensorField::Temperature => &mut self.temperature,
            SensorField::ExternalTemperature => &mut self.external_temperature,
            SensorField::IncubatorTemperature => &mut self.incubator_temperature,
            SensorField::Pressure => &mut self.pressure,
            SensorField::SoilMoisture => &mut self.soil_moisture,
            SensorField::WindSpeed => &mut self.wind_speed,
            SensorField::LightIntensity => &mut self.light_intensity,
            SensorField::Co2Saturation => &mut self.co2_saturation,
        };
        *slot = value;
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: 22.5,
            external_temperature: 18.0,
            incubator_temperature: 26.0,
            pressure: 1.2,
            soil_moisture: 45.0,
            wind_speed: 5.0,
            light_intensity: 800.0,
            co2_saturation: 420.0,
            taken_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}
