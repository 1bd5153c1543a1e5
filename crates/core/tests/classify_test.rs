use lessonsync_core::classify::{classify_lesson, TRAINING_MARKER};
use lessonsync_core::models::lesson::LessonType;
use lessonsync_core::title::{normalize_title, parse_title};
use pretty_assertions::assert_eq;

#[test]
fn test_all_day_event_is_personal() {
    assert_eq!(
        classify_lesson(true, "[Tetsu]パーソナル", "パーソナル"),
        LessonType::Personal
    );
}

#[test]
fn test_all_day_wins_over_training_marker() {
    let raw = format!("[Tetsu]{TRAINING_MARKER}説明会");
    assert_eq!(classify_lesson(true, &raw, "説明会"), LessonType::Personal);
}

#[test]
fn test_marker_in_resolved_title_is_training() {
    assert_eq!(
        classify_lesson(false, "[★2][Tetsu]RYT200養成講座", "RYT200養成講座"),
        LessonType::Training
    );
}

#[test]
fn test_marker_inside_bracket_token_is_training() {
    // Marker sits in a bracket token, so it is absent from the parsed title
    // but present in the raw summary.
    let raw = "[養成講座][Tetsu]解剖学";
    let parsed = parse_title(&normalize_title(raw));
    assert_eq!(parsed.title, "解剖学");
    assert_eq!(classify_lesson(false, raw, &parsed.title), LessonType::Training);
}

#[test]
fn test_timed_event_without_marker_is_normal() {
    assert_eq!(
        classify_lesson(false, "[★1][Aki]朝ヨガ", "朝ヨガ"),
        LessonType::Normal
    );
}
