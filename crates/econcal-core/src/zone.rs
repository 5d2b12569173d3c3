//! US daylight-saving arithmetic and Eastern-to-Japan conversion.

use time::{Date, Duration, Month, PrimitiveDateTime};

use crate::domain::{CalendarDate, ClockTime, JapanMoment};

/// Hours added to Eastern clock time to reach UTC.
const EASTERN_STANDARD_TO_UTC: i64 = 5;
const EASTERN_DAYLIGHT_TO_UTC: i64 = 4;
/// Hours added to UTC to reach Japan time.
const UTC_TO_JAPAN: i64 = 9;

/// Whether a US calendar date falls within Eastern daylight-saving time:
/// from the second Sunday of March (inclusive) to the first Sunday of
/// November (exclusive).
///
/// The comparison is calendar-date based, ignoring the 02:00 local
/// transition instant, so the two transition days classify at midnight
/// granularity.
pub fn is_us_dst(date: CalendarDate) -> bool {
    let year = date.year();
    let dst_start = nth_sunday(year, Month::March, 2);
    let dst_end = nth_sunday(year, Month::November, 1);
    let date = date.into_inner();
    dst_start <= date && date < dst_end
}

/// The Nth Sunday of the given month.
fn nth_sunday(year: i32, month: Month, nth: u8) -> Date {
    let first = Date::from_calendar_date(year, month, 1).expect("day 1 exists in every month");
    let first_dow = first.weekday().number_days_from_sunday();
    let first_sunday = 1 + ((7 - first_dow) % 7);
    let day = first_sunday + 7 * (nth - 1);
    Date::from_calendar_date(year, month, day)
        .expect("nth sunday stays within march and november")
}

/// Converts an Eastern-time (date, clock) pair to the equivalent Japan
/// moment. The resulting calendar date is recomputed from the shifted
/// instant and may roll forward past the input date.
pub fn eastern_to_japan(date: CalendarDate, time: ClockTime) -> JapanMoment {
    let to_utc = if is_us_dst(date) {
        EASTERN_DAYLIGHT_TO_UTC
    } else {
        EASTERN_STANDARD_TO_UTC
    };

    let eastern = PrimitiveDateTime::new(date.into_inner(), time.into_inner());
    let japan = eastern + Duration::hours(to_utc + UTC_TO_JAPAN);

    JapanMoment {
        date: CalendarDate::from_date(japan.date()),
        time: ClockTime::from_time(japan.time()),
    }
}
