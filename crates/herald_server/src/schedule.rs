//! Time-of-day schedules and their cron form.

use chrono::{DateTime, TimeZone};
use herald_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A daily firing time on the local clock.
///
/// Parses from `H:MM` or `HH:MM` and renders as zero-padded `HH:MM`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleTime {
    hour: u32,
    minute: u32,
}

impl ScheduleTime {
    /// Build a time, rejecting out-of-range fields.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ConfigError> {
        if hour > 23 || minute > 59 {
            return Err(ConfigError::new(format!(
                "Invalid schedule time {}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:MM`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending input.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let invalid = || {
            ConfigError::new(format!(
                "Invalid schedule time '{}', expected HH:MM",
                input
            ))
        };

        let (hour, minute) = input.trim().split_once(':').ok_or_else(invalid)?;
        let field = |s: &str, max_len: usize| -> Result<u32, ConfigError> {
            if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())
        };

        let hour = field(hour, 2)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let minute = field(minute, 2)?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute of hour, 0-59.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Five-field cron expression: `minute hour * * *`.
    pub fn cron_expression(&self) -> String {
        format!("{} {} * * *", self.minute, self.hour)
    }

    /// Seconds-resolution expression the scheduler runs: `0 minute hour * * *`.
    pub fn scheduler_expression(&self) -> String {
        format!("0 {}", self.cron_expression())
    }

    /// The compiled cron schedule.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the cron library rejects the expression.
    pub fn schedule(&self) -> Result<cron::Schedule, ConfigError> {
        cron::Schedule::from_str(&self.scheduler_expression()).map_err(|e| {
            ConfigError::new(format!(
                "Invalid cron expression '{}': {}",
                self.scheduler_expression(),
                e
            ))
        })
    }

    /// First firing strictly after `after`, in the same time zone.
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.schedule().ok()?.after(after).next()
    }
}

impl std::fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ScheduleTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ScheduleTime {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ScheduleTime> for String {
    fn from(value: ScheduleTime) -> Self {
        value.to_string()
    }
}

/// Parse a comma-separated list of times, ignoring blank items.
///
/// # Errors
///
/// Returns a `ConfigError` for the first invalid item, or when the list is
/// empty.
pub fn parse_schedule_times(list: &str) -> Result<Vec<ScheduleTime>, ConfigError> {
    let times = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ScheduleTime::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if times.is_empty() {
        return Err(ConfigError::new("SCHEDULE_TIMES contains no times"));
    }
    Ok(times)
}
