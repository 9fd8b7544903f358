use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule name must not be empty")]
    EmptyName,

    #[error("Schedule must run on at least one day")]
    NoDays,

    #[error("Schedule duration must be at least one minute")]
    ZeroDuration,

    #[error("Schedule {0} not found")]
    NotFound(Uuid),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Moisture threshold {0} is outside 0-100%")]
    MoistureOutOfRange(f64),

    #[error("Minimum moisture must not exceed maximum moisture")]
    MoistureOrdering,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("No reading received from the device yet")]
    NoReading,

    #[error("Device feed disconnected")]
    Disconnected,
}
