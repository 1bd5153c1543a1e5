/// Check-in scan and revert handlers
pub mod checkin;
/// Lesson catalog handlers
pub mod lessons;
/// Booking and cancellation handlers
pub mod reservations;
/// Calendar reconciliation handler
pub mod sync;
