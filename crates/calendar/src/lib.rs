//! # LessonSync Calendar
//!
//! Client for the studio's external calendar feed and the reconciliation
//! engine that keeps the lesson catalog in step with it.
//!
//! The feed is consumed through the [`feed::EventFeed`] trait so the sync
//! engine can be driven by the real Google Calendar API in production and
//! by a scripted feed in tests.

/// Paginated event feed: provider-agnostic event shapes and the Google
/// Calendar implementation
pub mod feed;
/// The reconciliation pass: normalize, parse, classify, upsert/delete
pub mod sync;
