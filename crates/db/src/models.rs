use chrono::{DateTime, Utc};
use lessonsync_core::checkin::ScanCandidate;
use lessonsync_core::models::lesson::LessonType;
use lessonsync_core::models::reservation::ReservationStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    /// Natural key for reconciliation against the calendar feed. Null for
    /// lessons created outside the sync.
    pub external_event_id: Option<String>,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub capacity: i32,
    pub lesson_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbLesson {
    /// Typed view of the `lesson_type` column. The column carries a CHECK
    /// constraint; an out-of-range value degrades to the display-only kind.
    pub fn kind(&self) -> LessonType {
        LessonType::parse(&self.lesson_type).unwrap_or(LessonType::Training)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMember {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub member_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbReservation {
    pub fn attendance(&self) -> ReservationStatus {
        ReservationStatus::parse(&self.status).unwrap_or(ReservationStatus::Attended)
    }
}

/// Fields the sync engine writes for one calendar event, keyed by
/// `external_event_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonUpsert {
    pub external_event_id: String,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub capacity: i32,
    pub lesson_type: LessonType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
}

/// Lesson row joined with its active reservation count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonWithCount {
    pub id: Uuid,
    pub external_event_id: Option<String>,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub capacity: i32,
    pub lesson_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub reserved_count: i64,
}

/// Reservation row joined with its lesson, for member-facing listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationWithLesson {
    pub reservation_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub lesson_id: Uuid,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub lesson_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Row shape backing [`ScanCandidate`].
#[derive(Debug, Clone, FromRow)]
pub struct ScanCandidateRow {
    pub reservation_id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub lesson_id: Uuid,
    pub lesson_title: String,
    pub lesson_start: DateTime<Utc>,
    pub status: String,
}

impl From<ScanCandidateRow> for ScanCandidate {
    fn from(row: ScanCandidateRow) -> Self {
        let status = ReservationStatus::parse(&row.status).unwrap_or(ReservationStatus::Attended);
        ScanCandidate {
            reservation_id: row.reservation_id,
            member_id: row.member_id,
            member_name: row.member_name,
            lesson_id: row.lesson_id,
            lesson_title: row.lesson_title,
            lesson_start: row.lesson_start,
            status,
        }
    }
}
