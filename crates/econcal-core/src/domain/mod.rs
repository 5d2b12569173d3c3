mod date;
mod range;
mod release;

use serde::{Deserialize, Serialize};

pub use date::{CalendarDate, ClockTime};
pub use range::{DateWindow, RangePreset, DEFAULT_DAYS_AFTER, DEFAULT_DAYS_BEFORE};
pub use release::{DisplayRecord, Importance, RawRelease, ReleaseId};

/// A moment in Asia/Tokyo civil time. Japan observes no DST; only the
/// source Eastern offset varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapanMoment {
    pub date: CalendarDate,
    pub time: ClockTime,
}
