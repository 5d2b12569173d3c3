use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Duration, Month, Time};

use crate::ValidationError;

/// Civil calendar date in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let month = Month::try_from(month).map_err(|_| ValidationError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        })?;
        let date =
            Date::from_calendar_date(year, month, day).map_err(|_| ValidationError::InvalidDate {
                value: format!("{year:04}-{:02}-{day:02}", u8::from(month)),
            })?;
        Ok(Self(date))
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    pub const fn month(self) -> u8 {
        self.0.month() as u8
    }

    pub const fn day(self) -> u8 {
        self.0.day()
    }

    /// Date shifted by whole days. Shifts beyond the supported calendar
    /// range are a programming error.
    pub fn offset_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDate {
            value: value.to_owned(),
        };

        let mut parts = value.splitn(3, '-');
        let year = parts
            .next()
            .and_then(|part| part.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|part| part.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let day = parts
            .next()
            .and_then(|part| part.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        Self::new(year, month, day).map_err(|_| invalid())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// Clock time in `HH:MM` form, always interpreted in a stated zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(Time);

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        let time = Time::from_hms(hour, minute, 0).map_err(|_| ValidationError::InvalidTime {
            value: format!("{hour:02}:{minute:02}"),
        })?;
        Ok(Self(time))
    }

    pub const fn from_time(time: Time) -> Self {
        Self(time)
    }

    pub const fn into_inner(self) -> Time {
        self.0
    }

    pub const fn hour(self) -> u8 {
        self.0.hour()
    }

    pub const fn minute(self) -> u8 {
        self.0.minute()
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: value.to_owned(),
        };

        let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendar_date() {
        let date: CalendarDate = "2025-08-13".parse().expect("must parse");
        assert_eq!((date.year(), date.month(), date.day()), (2025, 8, 13));
        assert_eq!(date.to_string(), "2025-08-13");
    }

    #[test]
    fn rejects_non_calendar_date() {
        for raw in ["2025-02-30", "2025/08/13", "not-a-date", "2025-13-01"] {
            let err = raw.parse::<CalendarDate>().expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }));
        }
    }

    #[test]
    fn offset_crosses_month_boundary() {
        let date: CalendarDate = "2025-08-31".parse().expect("must parse");
        assert_eq!(date.offset_days(1).to_string(), "2025-09-01");
        assert_eq!(date.offset_days(-31).to_string(), "2025-07-31");
    }

    #[test]
    fn parses_clock_time_with_zero_padding() {
        let time: ClockTime = "08:30".parse().expect("must parse");
        assert_eq!((time.hour(), time.minute()), (8, 30));
        assert_eq!(time.to_string(), "08:30");
    }

    #[test]
    fn rejects_out_of_range_clock_time() {
        for raw in ["24:00", "08:60", "0830", ""] {
            let err = raw.parse::<ClockTime>().expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidTime { .. }));
        }
    }
}
