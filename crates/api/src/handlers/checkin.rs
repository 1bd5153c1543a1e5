use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use lessonsync_core::checkin::select_scan_target;
use lessonsync_core::errors::StudioError;
use lessonsync_core::models::reservation::{
    ReservationStatus, RevertCheckInResponse, ScanRequest, ScanResponse,
};
use lessonsync_core::studio::local_day_bounds;

use crate::{middleware::error_handling::AppError, ApiState};

/// Handles a front-desk credential scan.
///
/// The credential carries the member id. Among that member's reservations
/// for lessons starting today (studio-local), the first still-confirmed one
/// is marked attended; if every one is already attended the scan is
/// rejected as a duplicate, and with no reservation at all it is rejected
/// outright.
#[axum::debug_handler]
pub async fn scan(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let member_id = Uuid::parse_str(payload.credential.trim()).map_err(|_| {
        StudioError::Validation("Scanned credential is not a valid member id".to_string())
    })?;

    state
        .store
        .get_member(member_id)
        .await?
        .ok_or_else(|| StudioError::NotFound(format!("Member with ID {member_id} not found")))?;

    let (day_start, day_end) = local_day_bounds(Utc::now(), state.studio_offset);
    let candidates = state
        .store
        .find_scan_candidates(member_id, day_start, day_end)
        .await?;

    let target = select_scan_target(&candidates).ok_or(StudioError::NoReservationToday)?;
    if target.status == ReservationStatus::Attended {
        return Err(AppError(StudioError::AlreadyCheckedIn));
    }

    state
        .store
        .set_attendance(target.reservation_id, ReservationStatus::Attended)
        .await?;

    tracing::info!(
        "Member {} checked in to lesson {} (reservation {})",
        member_id,
        target.lesson_id,
        target.reservation_id
    );

    Ok(Json(ScanResponse {
        reservation_id: target.reservation_id,
        member_name: target.member_name.clone(),
        lesson_title: target.lesson_title.clone(),
        lesson_start: target.lesson_start,
    }))
}

/// Staff correction: puts a checked-in reservation back to confirmed.
#[axum::debug_handler]
pub async fn revert_check_in(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RevertCheckInResponse>, AppError> {
    state
        .store
        .set_attendance(id, ReservationStatus::Confirmed)
        .await?;

    tracing::info!("Check-in reverted for reservation {}", id);

    Ok(Json(RevertCheckInResponse {
        reservation_id: id,
        status: ReservationStatus::Confirmed,
    }))
}
