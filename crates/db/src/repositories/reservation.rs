use chrono::{DateTime, Utc};
use lessonsync_core::booking::ensure_bookable;
use lessonsync_core::checkin::ScanCandidate;
use lessonsync_core::errors::{StudioError, StudioResult};
use lessonsync_core::models::reservation::ReservationStatus;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{DbLesson, DbReservation, ReservationWithLesson, ScanCandidateRow};
use crate::repositories::sql_err;

const RESERVATION_COLUMNS: &str = "id, lesson_id, member_id, status, created_at";

/// Books a lesson for a member.
///
/// Every precondition is evaluated inside one SERIALIZABLE transaction, so
/// the capacity and duplicate checks hold against the committed state at
/// insert time rather than a value read earlier in the request. The unique
/// (lesson_id, member_id) constraint backs the duplicate check as a second
/// line of defense.
pub async fn create_reservation(
    pool: &Pool<Postgres>,
    lesson_id: Uuid,
    member_id: Uuid,
    now: DateTime<Utc>,
) -> StudioResult<DbReservation> {
    let mut tx = pool.begin().await.map_err(sql_err)?;
    set_transaction_serializable(&mut tx).await?;

    let lesson = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, external_event_id, title, instructor_name, difficulty,
               capacity, lesson_type, start_time, end_time, description, created_at
        FROM lessons
        WHERE id = $1
        "#,
    )
    .bind(lesson_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(sql_err)?
    .ok_or_else(|| StudioError::NotFound(format!("Lesson with ID {lesson_id} not found")))?;

    ensure_bookable(lesson.kind(), lesson.start_time, now)?;

    let already_reserved = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM reservations
            WHERE lesson_id = $1 AND member_id = $2
        )
        "#,
    )
    .bind(lesson_id)
    .bind(member_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(sql_err)?;

    if already_reserved {
        return Err(StudioError::AlreadyReserved);
    }

    let reserved = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM reservations
        WHERE lesson_id = $1
        "#,
    )
    .bind(lesson_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(sql_err)?;

    if reserved >= i64::from(lesson.capacity) {
        return Err(StudioError::LessonFull);
    }

    let reservation = sqlx::query_as::<_, DbReservation>(&format!(
        r#"
        INSERT INTO reservations (id, lesson_id, member_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(lesson_id)
    .bind(member_id)
    .bind(ReservationStatus::Confirmed.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_insert_error)?;

    tx.commit().await.map_err(sql_err)?;

    tracing::debug!(
        "Reservation created: id={}, lesson_id={}, member_id={}",
        reservation.id,
        lesson_id,
        member_id
    );
    Ok(reservation)
}

/// Cancellation is a hard delete; the freed seat is visible immediately.
pub async fn delete_reservation(pool: &Pool<Postgres>, id: Uuid) -> StudioResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(sql_err)?;

    if result.rows_affected() < 1 {
        return Err(StudioError::NotFound(format!(
            "Reservation with ID {id} not found"
        )));
    }

    Ok(())
}

pub async fn list_member_reservations(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    from: DateTime<Utc>,
) -> StudioResult<Vec<ReservationWithLesson>> {
    let reservations = sqlx::query_as::<_, ReservationWithLesson>(
        r#"
        SELECT r.id AS reservation_id, r.status, r.created_at,
               l.id AS lesson_id, l.title, l.instructor_name, l.difficulty,
               l.lesson_type, l.start_time, l.end_time
        FROM reservations r
        INNER JOIN lessons l ON l.id = r.lesson_id
        WHERE r.member_id = $1 AND l.start_time >= $2
        ORDER BY l.start_time ASC
        "#,
    )
    .bind(member_id)
    .bind(from)
    .fetch_all(pool)
    .await
    .map_err(sql_err)?;

    Ok(reservations)
}

/// The scanned member's reservations among lessons starting inside the
/// given day bounds, in lesson start order.
pub async fn find_scan_candidates(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> StudioResult<Vec<ScanCandidate>> {
    let rows = sqlx::query_as::<_, ScanCandidateRow>(
        r#"
        SELECT r.id AS reservation_id, r.member_id, m.full_name AS member_name,
               l.id AS lesson_id, l.title AS lesson_title, l.start_time AS lesson_start,
               r.status
        FROM reservations r
        INNER JOIN lessons l ON l.id = r.lesson_id
        INNER JOIN members m ON m.id = r.member_id
        WHERE r.member_id = $1 AND l.start_time >= $2 AND l.start_time < $3
        ORDER BY l.start_time ASC
        "#,
    )
    .bind(member_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await
    .map_err(sql_err)?;

    Ok(rows.into_iter().map(ScanCandidate::from).collect())
}

pub async fn set_attendance(
    pool: &Pool<Postgres>,
    reservation_id: Uuid,
    status: ReservationStatus,
) -> StudioResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE reservations
        SET status = $2
        WHERE id = $1
        "#,
    )
    .bind(reservation_id)
    .bind(status.as_str())
    .execute(pool)
    .await
    .map_err(sql_err)?;

    if result.rows_affected() < 1 {
        return Err(StudioError::NotFound(format!(
            "Reservation with ID {reservation_id} not found"
        )));
    }

    Ok(())
}

async fn set_transaction_serializable(tx: &mut Transaction<'_, Postgres>) -> StudioResult<()> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut **tx)
        .await
        .map_err(sql_err)?;
    Ok(())
}

fn map_insert_error(err: sqlx::Error) -> StudioError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StudioError::AlreadyReserved;
        }
        if db_err.is_foreign_key_violation() {
            return StudioError::Validation("unknown lesson or member".to_string());
        }
    }
    sql_err(err)
}
