//! # LessonSync Core
//!
//! Domain logic for the studio lesson catalog and reservation system.
//! Everything in this crate is pure: the calendar title grammar, lesson
//! classification, booking preconditions, and check-in matching are all
//! plain functions over plain data, with no I/O. Persistence and the
//! HTTP surface live in the `lessonsync-db` and `lessonsync-api` crates.

/// Booking precondition rules (lesson type and cutoff window)
pub mod booking;
/// Check-in scan matching over a member's same-day reservations
pub mod checkin;
/// Lesson type inference from event shape and title content
pub mod classify;
/// Error taxonomy shared across the workspace
pub mod errors;
/// Domain models and API request/response types
pub mod models;
/// Studio-local calendar day arithmetic
pub mod studio;
/// Calendar event title normalization and the bracket grammar
pub mod title;
