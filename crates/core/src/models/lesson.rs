use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of catalog entry a calendar event maps to.
///
/// `Normal` lessons are bookable up to their capacity. `Personal` slots come
/// from all-day calendar entries and are requested through a separate
/// workflow rather than booked here. `Training` entries are display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Normal,
    Personal,
    Training,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Normal => "normal",
            LessonType::Personal => "personal",
            LessonType::Training => "training",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(LessonType::Normal),
            "personal" => Some(LessonType::Personal),
            "training" => Some(LessonType::Training),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: Uuid,
    pub external_event_id: Option<String>,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub capacity: i32,
    pub lesson_type: LessonType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub reserved_count: i64,
    /// Seats left for `normal` lessons; zero for the other types.
    pub remaining: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonWindowQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
