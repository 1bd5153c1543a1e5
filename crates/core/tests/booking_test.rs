use chrono::{Duration, Utc};
use lessonsync_core::booking::{booking_deadline, ensure_bookable};
use lessonsync_core::errors::StudioError;
use lessonsync_core::models::lesson::LessonType;

#[test]
fn test_booking_succeeds_before_cutoff() {
    let now = Utc::now();
    let start = now + Duration::minutes(61);
    assert!(ensure_bookable(LessonType::Normal, start, now).is_ok());
}

#[test]
fn test_booking_fails_inside_cutoff() {
    let now = Utc::now();
    let start = now + Duration::minutes(59);
    let err = ensure_bookable(LessonType::Normal, start, now).unwrap_err();
    assert!(matches!(err, StudioError::WindowClosed));
}

#[test]
fn test_booking_allowed_exactly_at_deadline() {
    let now = Utc::now();
    let start = now + Duration::hours(1);
    assert_eq!(booking_deadline(start), now);
    assert!(ensure_bookable(LessonType::Normal, start, now).is_ok());
}

#[test]
fn test_training_lesson_is_not_bookable() {
    let now = Utc::now();
    let err = ensure_bookable(LessonType::Training, now + Duration::days(1), now).unwrap_err();
    assert!(matches!(err, StudioError::NotBookable(_)));
}

#[test]
fn test_personal_slot_is_not_bookable() {
    let now = Utc::now();
    let err = ensure_bookable(LessonType::Personal, now + Duration::days(1), now).unwrap_err();
    assert!(matches!(err, StudioError::NotBookable(_)));
}

#[test]
fn test_type_check_precedes_window_check() {
    // A training lesson inside the window still reports NotBookable.
    let now = Utc::now();
    let err = ensure_bookable(LessonType::Training, now + Duration::minutes(10), now).unwrap_err();
    assert!(matches!(err, StudioError::NotBookable(_)));
}
