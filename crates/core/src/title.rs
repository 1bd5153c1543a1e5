//! Calendar event title grammar.
//!
//! Lesson titles are authored free-hand in the studio's calendar as up to
//! three bracket tokens followed by the display title:
//!
//! ```text
//! [difficulty][instructor][capacity]title    (full)
//! [difficulty][instructor]title              (normal)
//! [instructor]title                          (simple)
//! title                                      (no match)
//! ```
//!
//! Titles are normalized before parsing (full-width characters appear
//! routinely in hand-typed Japanese input). Parsing never fails: an
//! unmatched title produces a fully defaulted record.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Capacity used when the title carries none, or a non-numeric token.
pub const DEFAULT_CAPACITY: i32 = 15;
/// Difficulty marker used when the title carries none.
pub const DEFAULT_DIFFICULTY: &str = "★";
/// Instructor placeholder used when the title carries none.
pub const DEFAULT_INSTRUCTOR: &str = "TBA";

const LEVEL_ONE_CODE: &str = "★1";
const LEVEL_TWO_CODE: &str = "★2";
const LEVEL_ONE_LABEL: &str = "オールレベルのやさしいクラス";
const LEVEL_TWO_LABEL: &str = "中級クラス";

// Patterns tolerate stray text between bracket tokens, matching how the
// titles are actually typed.
static PATTERN_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(.*?)\].*?\[(.*?)\].*?\[(.*?)\](.*)$").expect("valid pattern")
});
static PATTERN_NORMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\].*?\[(.*?)\](.*)$").expect("valid pattern"));
static PATTERN_SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\](.*)$").expect("valid pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitle {
    pub title: String,
    pub instructor: String,
    pub capacity: i32,
    pub difficulty: String,
    /// Whether any bracket pattern matched. Defaults are a normal outcome,
    /// not an error.
    pub matched: bool,
}

/// Canonicalizes a raw calendar event title.
///
/// Full-width alphanumerics and punctuation (U+FF01..=U+FF5E, which covers
/// the full-width brackets ［］) are mapped to their half-width equivalents,
/// ideographic spaces become regular spaces, and the result is trimmed.
pub fn normalize_title(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '！'..='～' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses a normalized title against the bracket patterns, most specific
/// first. The first match wins; no match yields the defaulted record with
/// the whole input as the display title.
pub fn parse_title(normalized: &str) -> ParsedTitle {
    let parsed = match_full(normalized)
        .or_else(|| match_normal(normalized))
        .or_else(|| match_simple(normalized))
        .unwrap_or_else(|| ParsedTitle {
            title: normalized.to_string(),
            instructor: DEFAULT_INSTRUCTOR.to_string(),
            capacity: DEFAULT_CAPACITY,
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            matched: false,
        });

    if parsed.matched {
        translate_difficulty(parsed)
    } else {
        parsed
    }
}

fn match_full(input: &str) -> Option<ParsedTitle> {
    let caps = PATTERN_FULL.captures(input)?;
    let capacity = caps[3].trim().parse::<i32>().unwrap_or(DEFAULT_CAPACITY);
    Some(ParsedTitle {
        title: caps[4].trim().to_string(),
        instructor: caps[2].to_string(),
        capacity,
        difficulty: caps[1].to_string(),
        matched: true,
    })
}

fn match_normal(input: &str) -> Option<ParsedTitle> {
    let caps = PATTERN_NORMAL.captures(input)?;
    Some(ParsedTitle {
        title: caps[3].trim().to_string(),
        instructor: caps[2].to_string(),
        capacity: DEFAULT_CAPACITY,
        difficulty: caps[1].to_string(),
        matched: true,
    })
}

fn match_simple(input: &str) -> Option<ParsedTitle> {
    let caps = PATTERN_SIMPLE.captures(input)?;
    Some(ParsedTitle {
        title: caps[2].trim().to_string(),
        instructor: caps[1].to_string(),
        capacity: DEFAULT_CAPACITY,
        difficulty: DEFAULT_DIFFICULTY.to_string(),
        matched: true,
    })
}

/// Maps the studio's shorthand difficulty codes to their display labels.
/// Unknown codes pass through verbatim.
fn translate_difficulty(mut parsed: ParsedTitle) -> ParsedTitle {
    parsed.difficulty = match parsed.difficulty.as_str() {
        LEVEL_ONE_CODE => LEVEL_ONE_LABEL.to_string(),
        LEVEL_TWO_CODE => LEVEL_TWO_LABEL.to_string(),
        _ => parsed.difficulty,
    };
    parsed
}
