//! Check-in scan matching.
//!
//! A scanned credential resolves to a member id; the store supplies that
//! member's reservations among today's lessons and the matcher picks the
//! one the scan should act on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::reservation::ReservationStatus;

/// One of the scanned member's reservations for a lesson starting today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCandidate {
    pub reservation_id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub lesson_id: Uuid,
    pub lesson_title: String,
    pub lesson_start: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Picks the reservation a scan applies to.
///
/// Candidates are expected in lesson start order. A still-confirmed
/// reservation is preferred over one already attended, so a member with two
/// classes in one day checks into the second after attending the first.
/// If everything is attended, the first candidate is returned so the caller
/// can surface a distinct already-checked-in outcome.
pub fn select_scan_target(candidates: &[ScanCandidate]) -> Option<&ScanCandidate> {
    candidates
        .iter()
        .find(|c| c.status == ReservationStatus::Confirmed)
        .or_else(|| candidates.first())
}
