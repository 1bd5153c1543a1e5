use pretty_assertions::assert_eq;
use rstest::rstest;
use lessonsync_core::title::{normalize_title, parse_title, DEFAULT_CAPACITY};

#[test]
fn test_normalize_full_width_alphanumerics() {
    assert_eq!(normalize_title("Ｔｅｔｓｕ１０"), "Tetsu10");
}

#[test]
fn test_normalize_full_width_brackets_and_spaces() {
    assert_eq!(normalize_title("［★２］　パワーヨガ"), "[★2] パワーヨガ");
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize_title("  ヨガ　"), "ヨガ");
}

#[test]
fn test_normalize_is_identity_on_plain_input() {
    assert_eq!(normalize_title("[★1][Aki]モーニングフロー"), "[★1][Aki]モーニングフロー");
}

#[test]
fn test_full_pattern_with_numeric_capacity() {
    let parsed = parse_title("[★2][Tetsu][10]パワーヨガ");
    assert!(parsed.matched);
    assert_eq!(parsed.difficulty, "中級クラス");
    assert_eq!(parsed.instructor, "Tetsu");
    assert_eq!(parsed.capacity, 10);
    assert_eq!(parsed.title, "パワーヨガ");
}

#[test]
fn test_full_pattern_with_non_numeric_capacity_falls_back() {
    let parsed = parse_title("[★1][Aki][abc]モーニングフロー");
    assert!(parsed.matched);
    assert_eq!(parsed.capacity, DEFAULT_CAPACITY);
    assert_eq!(parsed.difficulty, "オールレベルのやさしいクラス");
    assert_eq!(parsed.instructor, "Aki");
    assert_eq!(parsed.title, "モーニングフロー");
}

#[test]
fn test_normal_pattern_takes_default_capacity() {
    let parsed = parse_title("[★2][Yui]アロマヨガ");
    assert!(parsed.matched);
    assert_eq!(parsed.difficulty, "中級クラス");
    assert_eq!(parsed.instructor, "Yui");
    assert_eq!(parsed.capacity, DEFAULT_CAPACITY);
    assert_eq!(parsed.title, "アロマヨガ");
}

#[test]
fn test_simple_pattern_defaults_difficulty() {
    let parsed = parse_title("[Tetsu]パーソナル");
    assert!(parsed.matched);
    assert_eq!(parsed.instructor, "Tetsu");
    assert_eq!(parsed.difficulty, "★");
    assert_eq!(parsed.capacity, DEFAULT_CAPACITY);
    assert_eq!(parsed.title, "パーソナル");
}

#[test]
fn test_no_match_is_fully_defaulted() {
    let parsed = parse_title("ヨガベーシック");
    assert!(!parsed.matched);
    assert_eq!(parsed.title, "ヨガベーシック");
    assert_eq!(parsed.instructor, "TBA");
    assert_eq!(parsed.difficulty, "★");
    assert_eq!(parsed.capacity, DEFAULT_CAPACITY);
}

#[test]
fn test_unknown_difficulty_code_kept_verbatim() {
    let parsed = parse_title("[入門][Mio]リラックスヨガ");
    assert_eq!(parsed.difficulty, "入門");
}

#[test]
fn test_full_width_title_normalizes_then_parses() {
    let normalized = normalize_title("［★２］［Ｔｅｔｓｕ］［１０］パワーヨガ");
    let parsed = parse_title(&normalized);
    assert!(parsed.matched);
    assert_eq!(parsed.difficulty, "中級クラス");
    assert_eq!(parsed.instructor, "Tetsu");
    assert_eq!(parsed.capacity, 10);
    assert_eq!(parsed.title, "パワーヨガ");
}

#[rstest]
#[case("[★1][Aki][20]朝ヨガ", 20)]
#[case("[★1][Aki][0]朝ヨガ", 0)]
#[case("[★1][Aki][ 8 ]朝ヨガ", 8)]
#[case("[★1][Aki][twelve]朝ヨガ", DEFAULT_CAPACITY)]
fn test_capacity_token_parsing(#[case] title: &str, #[case] expected: i32) {
    assert_eq!(parse_title(title).capacity, expected);
}

#[test]
fn test_difficulty_not_translated_without_match() {
    // No bracket pattern, so the ★1 inside the text is not a code token.
    let parsed = parse_title("ベーシック★1クラス");
    assert!(!parsed.matched);
    assert_eq!(parsed.difficulty, "★");
}
