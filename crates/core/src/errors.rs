use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Lesson is not open for booking: {0}")]
    NotBookable(String),

    #[error("Booking window is closed (bookings close one hour before start)")]
    WindowClosed,

    #[error("Member already has a reservation for this lesson")]
    AlreadyReserved,

    #[error("Lesson is fully booked")]
    LessonFull,

    #[error("No reservation found for today")]
    NoReservationToday,

    #[error("Reservation has already been checked in")]
    AlreadyCheckedIn,

    #[error("Calendar feed error: {0}")]
    Feed(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StudioError {
    /// Stable machine-readable code, surfaced in API error bodies so
    /// callers can render a specific message per failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            StudioError::NotFound(_) => "not_found",
            StudioError::Validation(_) => "validation",
            StudioError::NotBookable(_) => "not_bookable",
            StudioError::WindowClosed => "window_closed",
            StudioError::AlreadyReserved => "already_reserved",
            StudioError::LessonFull => "lesson_full",
            StudioError::NoReservationToday => "no_reservation_today",
            StudioError::AlreadyCheckedIn => "already_checked_in",
            StudioError::Feed(_) => "feed_error",
            StudioError::Database(_) => "database_error",
            StudioError::Internal(_) => "internal_error",
        }
    }
}

pub type StudioResult<T> = Result<T, StudioError>;
