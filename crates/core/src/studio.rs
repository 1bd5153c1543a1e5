//! Studio-local calendar day arithmetic.
//!
//! The studio operates in a single locale, configured as a fixed UTC
//! offset. "Today" for check-in and the bounds synthesized for all-day
//! events are both defined in that locale.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::{StudioError, StudioResult};

/// Default studio locale: JST.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

pub fn studio_offset(hours: i32) -> StudioResult<FixedOffset> {
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| StudioError::Validation(format!("invalid UTC offset: {hours} hours")))
}

/// UTC bounds `[start, end)` of the studio-local calendar day containing
/// `as_of`.
pub fn local_day_bounds(as_of: DateTime<Utc>, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = as_of.with_timezone(&offset).date_naive();
    let start = offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .unwrap()
        .with_timezone(&Utc);
    (start, start + Duration::days(1))
}

/// UTC instants an all-day calendar entry occupies: 00:00:00 through
/// 23:59:59 on its date in the studio locale.
pub fn all_day_bounds(date: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .unwrap()
        .with_timezone(&Utc);
    let end = start + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59);
    (start, end)
}
