use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::util::days_in_year_month;

use crate::domain::CalendarDate;
use crate::ValidationError;

/// Default lookback/lookahead when no preset or override is given.
pub const DEFAULT_DAYS_BEFORE: u32 = 2;
pub const DEFAULT_DAYS_AFTER: u32 = 14;

/// Inclusive date window the calendar is fetched and filtered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateWindow {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Window spanning `days_before` days back and `days_after` days
    /// forward from the anchor date, both inclusive.
    pub fn around(today: CalendarDate, days_before: u32, days_after: u32) -> Self {
        Self {
            start: today.offset_days(-i64::from(days_before)),
            end: today.offset_days(i64::from(days_after)),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Named date-range presets resolved against a supplied anchor date.
/// Weeks run Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePreset {
    ThisWeek,
    NextWeek,
    ThisMonth,
    Next30,
}

impl RangePreset {
    pub const ALL: [Self; 4] = [Self::ThisWeek, Self::NextWeek, Self::ThisMonth, Self::Next30];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisWeek => "thisweek",
            Self::NextWeek => "nextweek",
            Self::ThisMonth => "month",
            Self::Next30 => "next30",
        }
    }

    /// Lookback/lookahead day counts for this preset anchored on `today`.
    pub fn days(self, today: CalendarDate) -> (u32, u32) {
        let since_monday = u32::from(today.into_inner().weekday().number_days_from_monday());
        match self {
            Self::ThisWeek => (since_monday, 6 - since_monday),
            Self::NextWeek => (0, (7 - since_monday) + 6),
            Self::ThisMonth => {
                let date = today.into_inner();
                let last_day = u32::from(days_in_year_month(date.year(), date.month()));
                let day = u32::from(date.day());
                (day - 1, last_day - day)
            }
            Self::Next30 => (0, 30),
        }
    }

    pub fn window(self, today: CalendarDate) -> DateWindow {
        let (before, after) = self.days(today);
        DateWindow::around(today, before, after)
    }
}

impl Display for RangePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangePreset {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" | "thisweek" => Ok(Self::ThisWeek),
            "nextweek" => Ok(Self::NextWeek),
            "month" | "thismonth" => Ok(Self::ThisMonth),
            "next30" | "30d" | "30days" => Ok(Self::Next30),
            other => Err(ValidationError::InvalidPreset {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> CalendarDate {
        raw.parse().expect("valid test date")
    }

    #[test]
    fn this_week_spans_monday_through_sunday() {
        // 2025-08-06 is a Wednesday.
        let window = RangePreset::ThisWeek.window(date("2025-08-06"));
        assert_eq!(window.start, date("2025-08-04"));
        assert_eq!(window.end, date("2025-08-10"));
    }

    #[test]
    fn next_week_ends_on_following_sunday() {
        let window = RangePreset::NextWeek.window(date("2025-08-06"));
        assert_eq!(window.start, date("2025-08-06"));
        assert_eq!(window.end, date("2025-08-17"));
    }

    #[test]
    fn this_month_covers_calendar_month_bounds() {
        let window = RangePreset::ThisMonth.window(date("2025-08-06"));
        assert_eq!(window.start, date("2025-08-01"));
        assert_eq!(window.end, date("2025-08-31"));

        let february = RangePreset::ThisMonth.window(date("2024-02-10"));
        assert_eq!(february.end, date("2024-02-29"));
    }

    #[test]
    fn next30_looks_only_forward() {
        let window = RangePreset::Next30.window(date("2025-08-06"));
        assert_eq!(window.start, date("2025-08-06"));
        assert_eq!(window.end, date("2025-09-05"));
    }

    #[test]
    fn parses_preset_aliases() {
        assert_eq!("week".parse::<RangePreset>().expect("must parse"), RangePreset::ThisWeek);
        assert_eq!("thismonth".parse::<RangePreset>().expect("must parse"), RangePreset::ThisMonth);
        assert_eq!("30days".parse::<RangePreset>().expect("must parse"), RangePreset::Next30);
    }

    #[test]
    fn rejects_unknown_preset() {
        let err = "fortnight".parse::<RangePreset>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPreset { .. }));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = DateWindow::new(date("2025-08-10"), date("2025-08-01")).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidWindow { .. }));
    }

    #[test]
    fn window_contains_its_bounds() {
        let window = DateWindow::around(date("2025-08-06"), 2, 14);
        assert!(window.contains(date("2025-08-04")));
        assert!(window.contains(date("2025-08-20")));
        assert!(!window.contains(date("2025-08-03")));
        assert!(!window.contains(date("2025-08-21")));
    }
}
