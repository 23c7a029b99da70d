use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::*;

use crate::error::{SkyMapError, SkyMapResult};

/// Instant of an observation: a UTC calendar date at a whole hour.
///
/// Minutes and seconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawObservationTime")]
pub struct ObservationTime {
    date: NaiveDate,
    hour: u32,
}

#[derive(Deserialize)]
struct RawObservationTime {
    date: NaiveDate,
    hour: i64,
}

impl TryFrom<RawObservationTime> for ObservationTime {
    type Error = SkyMapError;

    fn try_from(raw: RawObservationTime) -> SkyMapResult<Self> {
        ObservationTime::from_date_hour(raw.date, raw.hour)
    }
}

impl ObservationTime {
    /// Build from calendar components, validating the date and the hour.
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> SkyMapResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            SkyMapError::InvalidDate {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
                reason: "no such calendar date".to_string(),
            }
        })?;
        Self::from_date_hour(date, i64::from(hour))
    }

    /// Build from an already parsed date and an hour of day.
    pub fn from_date_hour(date: NaiveDate, hour: i64) -> SkyMapResult<Self> {
        if !(0..=23).contains(&hour) {
            return Err(SkyMapError::InvalidHour(hour));
        }
        Ok(Self {
            date,
            hour: hour as u32,
        })
    }

    /// Parse the date input of the UI and combine it with the hour dropdown.
    ///
    /// Accepts `YYYY-MM-DD` or an ISO date-time such as `2024-06-21T00:00:00`;
    /// only the date part of a date-time is used.
    pub fn parse(date: &str, hour: i64) -> SkyMapResult<Self> {
        let trimmed = date.trim();
        let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
            })
            .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
            .map_err(|e| SkyMapError::InvalidDate {
                input: date.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_date_hour(parsed, hour)
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The instant as a UTC timestamp.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        (self.date.and_time(chrono::NaiveTime::MIN) + chrono::Duration::hours(i64::from(self.hour)))
            .and_utc()
    }
}

impl std::fmt::Display for ObservationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{:02}:00Z", self.date, self.hour)
    }
}
