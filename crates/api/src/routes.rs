/// Front-desk check-in endpoints
pub mod checkin;
/// Health and version endpoints
pub mod health;
/// Lesson catalog endpoints
pub mod lessons;
/// Booking and cancellation endpoints
pub mod reservations;
/// Calendar reconciliation trigger
pub mod sync;
