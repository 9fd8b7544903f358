use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use hortisync_api::models::{SensorField, SensorSnapshot};
use hortisync_control::{SensorSource, SourceError};

/// How a simulated field is bounded after noise is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ClampPolicy {
    /// No hard ceiling or floor
    Unclamped,
    /// Clamp into `[min, max]`
    Range { min: f64, max: f64 },
}

impl ClampPolicy {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            ClampPolicy::Unclamped => value,
            ClampPolicy::Range { min, max } => value.max(min).min(max),
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            ClampPolicy::Unclamped => true,
            ClampPolicy::Range { min, max } => min <= max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Peak-to-peak noise added per tick
    pub amplitude: f64,
    pub clamp: ClampPolicy,
}

impl FieldSpec {
    const fn unclamped(amplitude: f64) -> Self {
        Self {
            amplitude,
            clamp: ClampPolicy::Unclamped,
        }
    }

    const fn range(amplitude: f64, min: f64, max: f64) -> Self {
        Self {
            amplitude,
            clamp: ClampPolicy::Range { min, max },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpecs {
    pub temperature: FieldSpec,
    pub external_temperature: FieldSpec,
    pub incubator_temperature: FieldSpec,
    pub pressure: FieldSpec,
    pub soil_moisture: FieldSpec,
    pub wind_speed: FieldSpec,
    pub light_intensity: FieldSpec,
    pub co2_saturation: FieldSpec,
}

impl FieldSpecs {
    pub fn get(&self, field: SensorField) -> &FieldSpec {
        match field {
            SensorField::Temperature => &self.temperature,
            SensorField::ExternalTemperature => &self.external_temperature,
            SensorField::IncubatorTemperature => &self.incubator_temperature,
            SensorField::Pressure => &self.pressure,
            SensorField::SoilMoisture => &self.soil_moisture,
            SensorField::WindSpeed => &self.wind_speed,
            SensorField::LightIntensity => &self.light_intensity,
            SensorField::Co2Saturation => &self.co2_saturation,
        }
    }
}

// Temperatures carry no clamp. Whether that is intended is still open, so it
// stays a per-field policy instead of being fixed here.
impl Default for FieldSpecs {
    fn default() -> Self {
        Self {
            temperature: FieldSpec::unclamped(1.0),
            external_temperature: FieldSpec::unclamped(1.0),
            incubator_temperature: FieldSpec::unclamped(0.5),
            pressure: FieldSpec::range(0.1, 0.0, 3.0),
            soil_moisture: FieldSpec::range(10.0, 20.0, 90.0),
            wind_speed: FieldSpec::range(4.0, 0.0, 30.0),
            light_intensity: FieldSpec::range(100.0, 0.0, 2000.0),
            co2_saturation: FieldSpec::range(50.0, 300.0, 2000.0),
        }
    }
}

/// Random-walk stand-in for real telemetry. Readings are stamped when drawn.
pub struct SimulatedSource {
    rng: StdRng,
    fields: FieldSpecs,
}

impl SimulatedSource {
    pub fn new(fields: FieldSpecs) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            fields,
        }
    }

    pub fn seeded(fields: FieldSpecs, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fields,
        }
    }
}

impl SensorSource for SimulatedSource {
    fn sample(&mut self, previous: &SensorSnapshot) -> Result<SensorSnapshot, SourceError> {
        let mut next = previous.clone();

        for field in SensorField::ALL {
            let spec = self.fields.get(field);
            let noise = self.rng.random_range(-0.5..0.5) * spec.amplitude;

            next.set(field, spec.clamp.apply(previous.get(field) + noise));
        }
        next.taken_at = OffsetDateTime::now_utc();

        Ok(next)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
