//! Lesson type inference.

use crate::models::lesson::LessonType;

/// Literal substring that marks an instructor training program. It may sit
/// inside a bracket token or in the display title, so classification looks
/// at both the raw summary and the parsed title.
pub const TRAINING_MARKER: &str = "養成講座";

/// Infers the lesson type from the source event's shape and title content.
///
/// All-day events are personal sessions regardless of any bracket tokens
/// present (their capacity is forced to 1 by the sync engine). Timed events
/// carrying the training marker are display-only training programs.
pub fn classify_lesson(all_day: bool, raw_summary: &str, resolved_title: &str) -> LessonType {
    if all_day {
        return LessonType::Personal;
    }
    if raw_summary.contains(TRAINING_MARKER) || resolved_title.contains(TRAINING_MARKER) {
        return LessonType::Training;
    }
    LessonType::Normal
}
