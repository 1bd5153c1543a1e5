use std::error::Error;
use lessonsync_core::errors::{StudioError, StudioResult};

#[test]
fn test_studio_error_display() {
    let not_found = StudioError::NotFound("Lesson not found".to_string());
    let validation = StudioError::Validation("Invalid input".to_string());
    let not_bookable = StudioError::NotBookable("training programs are display-only".to_string());
    let database = StudioError::Database(eyre::eyre!("Database connection failed"));

    assert_eq!(not_found.to_string(), "Resource not found: Lesson not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert!(not_bookable.to_string().contains("not open for booking"));
    assert_eq!(StudioError::LessonFull.to_string(), "Lesson is fully booked");
    assert!(database.to_string().contains("Database error:"));
}

#[test]
fn test_booking_failure_codes_are_distinct() {
    let codes = [
        StudioError::AlreadyReserved.code(),
        StudioError::LessonFull.code(),
        StudioError::WindowClosed.code(),
        StudioError::NotBookable(String::new()).code(),
        StudioError::NoReservationToday.code(),
        StudioError::AlreadyCheckedIn.code(),
    ];
    for (i, a) in codes.iter().enumerate() {
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let studio_error = StudioError::Internal(Box::new(io_error));

    assert!(studio_error.source().is_some());
}

#[test]
fn test_studio_result() {
    let result: StudioResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: StudioResult<i32> = Err(StudioError::NoReservationToday);
    assert!(result.is_err());
}
