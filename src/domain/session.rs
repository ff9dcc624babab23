//! Regular-trading-hours session filter.
//!
//! Signals only fire between 09:30 and 16:00 New York civil time. The
//! window check takes a timezone-aware instant so the rest of the signal
//! logic stays timezone-agnostic.

use chrono::{DateTime, Timelike};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// Convert a Unix-seconds timestamp to New York civil time, honoring DST.
///
/// Epoch instants map to exactly one local time, so DST transitions need
/// no disambiguation; `None` only for timestamps outside chrono's range.
pub fn ny_time(timestamp: i64) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&New_York))
}

/// True when `local` lies in the regular session window `[09:30, 16:00)`.
pub fn is_regular_session(local: &DateTime<Tz>) -> bool {
    let hour = local.hour();
    let minute = local.minute();
    (hour > 9 || (hour == 9 && minute >= 30)) && hour < 16
}

/// Session check straight from a bar timestamp.
pub fn in_ny_session(timestamp: i64) -> bool {
    ny_time(timestamp).is_some_and(|local| is_regular_session(&local))
}
