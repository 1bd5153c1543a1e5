use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use lessonsync_core::errors::StudioError;
use lessonsync_core::models::lesson::LessonType;
use lessonsync_core::models::reservation::{
    BookLessonRequest, CancelReservationResponse, MemberReservationResponse, ReservationResponse,
    ReservationStatus,
};
use lessonsync_db::models::ReservationWithLesson;

use crate::{middleware::error_handling::AppError, ApiState};

/// Books a seat on a lesson for a member.
///
/// Every precondition (lesson exists and is bookable, the window is open,
/// no duplicate, a seat is free) is checked by the store atomically with
/// the insert, so two racing requests for the last seat cannot both
/// succeed.
#[axum::debug_handler]
pub async fn book_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookLessonRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let member = state
        .store
        .get_member(payload.member_id)
        .await?
        .ok_or_else(|| {
            StudioError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    let reservation = state
        .store
        .create_reservation(payload.lesson_id, member.id, Utc::now())
        .await?;

    tracing::info!(
        "Member {} booked lesson {} (reservation {})",
        member.id,
        reservation.lesson_id,
        reservation.id
    );

    Ok(Json(ReservationResponse {
        id: reservation.id,
        lesson_id: reservation.lesson_id,
        member_id: reservation.member_id,
        status: reservation.attendance(),
        created_at: reservation.created_at,
    }))
}

/// Cancels a reservation. The row is deleted outright, so the seat frees
/// immediately for other members.
#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelReservationResponse>, AppError> {
    state.store.delete_reservation(id).await?;

    tracing::info!("Reservation {} cancelled", id);

    Ok(Json(CancelReservationResponse {
        id,
        cancelled: true,
    }))
}

/// Lists a member's upcoming reservations with their lessons, ordered by
/// lesson start.
#[axum::debug_handler]
pub async fn list_member_reservations(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MemberReservationResponse>>, AppError> {
    state
        .store
        .get_member(id)
        .await?
        .ok_or_else(|| StudioError::NotFound(format!("Member with ID {id} not found")))?;

    let reservations = state
        .store
        .list_member_reservations(id, Utc::now())
        .await?;
    let response = reservations.into_iter().map(to_response).collect();

    Ok(Json(response))
}

fn to_response(row: ReservationWithLesson) -> MemberReservationResponse {
    MemberReservationResponse {
        reservation_id: row.reservation_id,
        status: ReservationStatus::parse(&row.status).unwrap_or(ReservationStatus::Attended),
        lesson_id: row.lesson_id,
        title: row.title,
        instructor_name: row.instructor_name,
        difficulty: row.difficulty,
        lesson_type: LessonType::parse(&row.lesson_type).unwrap_or(LessonType::Training),
        start_time: row.start_time,
        end_time: row.end_time,
    }
}
