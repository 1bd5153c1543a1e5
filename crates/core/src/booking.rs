//! Booking preconditions.
//!
//! Only the checks that need no store state live here: lesson type and the
//! cutoff window. Duplicate and capacity checks are enforced by the store
//! inside the same transaction as the insert, so two concurrent bookings
//! for the last seat cannot both commit.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{StudioError, StudioResult};
use crate::models::lesson::LessonType;

/// Last instant at which a normal lesson accepts bookings.
pub fn booking_deadline(start_time: DateTime<Utc>) -> DateTime<Utc> {
    start_time - Duration::hours(1)
}

/// Checks that a lesson of the given type and start time accepts a booking
/// at `now`. Cancellation is intentionally not subject to this cutoff.
pub fn ensure_bookable(
    lesson_type: LessonType,
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> StudioResult<()> {
    match lesson_type {
        LessonType::Training => {
            return Err(StudioError::NotBookable(
                "training programs are display-only".to_string(),
            ));
        }
        LessonType::Personal => {
            return Err(StudioError::NotBookable(
                "personal sessions are arranged by request, not booked directly".to_string(),
            ));
        }
        LessonType::Normal => {}
    }

    if now > booking_deadline(start_time) {
        return Err(StudioError::WindowClosed);
    }

    Ok(())
}
