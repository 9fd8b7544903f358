use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.key() == s)
            .ok_or(ScheduleParseError::UnknownWeekday)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleParseError {
    Malformed,
    HourOutOfRange,
    MinuteOutOfRange,
    UnknownWeekday,
}

impl fmt::Display for ScheduleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleParseError::Malformed => write!(f, "Expected a time formatted as HH:MM"),
            ScheduleParseError::HourOutOfRange => write!(f, "Hour must be between 00 and 23"),
            ScheduleParseError::MinuteOutOfRange => write!(f, "Minute must be between 00 and 59"),
            ScheduleParseError::UnknownWeekday => write!(f, "Unknown weekday key"),
        }
    }
}

/// Wall-clock start time, serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleParseError> {
        if hour > 23 {
            return Err(ScheduleParseError::HourOutOfRange);
        }
        if minute > 59 {
            return Err(ScheduleParseError::MinuteOutOfRange);
        }

        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s.split_once(':').ok_or(ScheduleParseError::Malformed)?;

        let two_digits = |part: &str| {
            if part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<u8>().map_err(|_| ScheduleParseError::Malformed)
            } else {
                Err(ScheduleParseError::Malformed)
            }
        };

        Self::new(two_digits(hour)?, two_digits(minute)?)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A user-defined watering window. Schedules are declarative only: nothing
/// evaluates them against the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationSchedule {
    /// Schedule identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Start time of day
    pub start_time: ClockTime,
    /// Duration in minutes
    pub duration: u32,
    /// Days the schedule applies to
    pub days: BTreeSet<Weekday>,
    /// Whether the schedule is enabled
    pub active: bool,
}

/// Schedule creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub name: String,
    pub start_time: ClockTime,
    pub duration: u32,
    pub days: BTreeSet<Weekday>,
    pub active: bool,
}

impl ScheduleDraft {
    /// The two schedules every fresh installation starts with.
    pub fn defaults() -> Vec<ScheduleDraft> {
        vec![
            ScheduleDraft {
                name: "Night watering".to_string(),
                start_time: ClockTime { hour: 2, minute: 0 },
                duration: 180,
                days: BTreeSet::from([Weekday::Monday, Weekday::Wednesday, Weekday::Friday]),
                active: true,
            },
            ScheduleDraft {
                name: "Evening watering".to_string(),
                start_time: ClockTime { hour: 18, minute: 0 },
                duration: 20,
                days: BTreeSet::from([Weekday::Tuesday, Weekday::Thursday, Weekday::Saturday]),
                active: true,
            },
        ]
    }
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_time: ClockTime { hour: 6, minute: 0 },
            duration: 30,
            days: BTreeSet::new(),
            active: true,
        }
    }
}

/// Schedule update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub name: Option<String>,
    pub start_time: Option<ClockTime>,
    pub duration: Option<u32>,
    pub days: Option<BTreeSet<Weekday>>,
    pub active: Option<bool>,
}
