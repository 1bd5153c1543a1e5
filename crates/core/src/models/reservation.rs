use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lesson::LessonType;

/// Attendance state of a reservation. Cancellation is a hard delete, so
/// there is no cancelled state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Attended,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Attended => "attended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(ReservationStatus::Confirmed),
            "attended" => Some(ReservationStatus::Attended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookLessonRequest {
    pub lesson_id: Uuid,
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub member_id: Uuid,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelReservationResponse {
    pub id: Uuid,
    pub cancelled: bool,
}

/// One entry of a member's reservation list, joined with its lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReservationResponse {
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
    pub lesson_id: Uuid,
    pub title: String,
    pub instructor_name: String,
    pub difficulty: String,
    pub lesson_type: LessonType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// Decoded 2D-barcode payload: the member identifier.
    pub credential: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub reservation_id: Uuid,
    pub member_name: String,
    pub lesson_title: String,
    pub lesson_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertCheckInResponse {
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
}
