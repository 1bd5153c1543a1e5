use chrono::{DateTime, Utc};
use lessonsync_core::errors::StudioResult;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbLesson, LessonUpsert, LessonWithCount};
use crate::repositories::sql_err;

const LESSON_COLUMNS: &str = "id, external_event_id, title, instructor_name, difficulty, \
                              capacity, lesson_type, start_time, end_time, description, created_at";

/// Writes a lesson keyed by its external event id. Running the same upsert
/// twice leaves the row unchanged (convergent, last write wins).
pub async fn upsert_lesson(pool: &Pool<Postgres>, up: &LessonUpsert) -> StudioResult<DbLesson> {
    tracing::debug!(
        "Upserting lesson: event_id={}, title={}, type={}",
        up.external_event_id,
        up.title,
        up.lesson_type.as_str()
    );

    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        INSERT INTO lessons (id, external_event_id, title, instructor_name, difficulty,
                             capacity, lesson_type, start_time, end_time, description, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (external_event_id) DO UPDATE SET
            title = EXCLUDED.title,
            instructor_name = EXCLUDED.instructor_name,
            difficulty = EXCLUDED.difficulty,
            capacity = EXCLUDED.capacity,
            lesson_type = EXCLUDED.lesson_type,
            start_time = EXCLUDED.start_time,
            end_time = EXCLUDED.end_time,
            description = EXCLUDED.description
        RETURNING {LESSON_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&up.external_event_id)
    .bind(&up.title)
    .bind(&up.instructor_name)
    .bind(&up.difficulty)
    .bind(up.capacity)
    .bind(up.lesson_type.as_str())
    .bind(up.start_time)
    .bind(up.end_time)
    .bind(&up.description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(sql_err)?;

    Ok(lesson)
}

/// Deletes the lesson sourced from the given calendar event. Returns whether
/// a row existed; deleting an absent row is not an error.
pub async fn delete_lesson_by_event_id(
    pool: &Pool<Postgres>,
    external_event_id: &str,
) -> StudioResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM lessons
        WHERE external_event_id = $1
        "#,
    )
    .bind(external_event_id)
    .execute(pool)
    .await
    .map_err(sql_err)?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_lesson_by_id(pool: &Pool<Postgres>, id: Uuid) -> StudioResult<Option<DbLesson>> {
    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        SELECT {LESSON_COLUMNS}
        FROM lessons
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(sql_err)?;

    Ok(lesson)
}

pub async fn get_lesson_by_event_id(
    pool: &Pool<Postgres>,
    external_event_id: &str,
) -> StudioResult<Option<DbLesson>> {
    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        SELECT {LESSON_COLUMNS}
        FROM lessons
        WHERE external_event_id = $1
        "#
    ))
    .bind(external_event_id)
    .fetch_optional(pool)
    .await
    .map_err(sql_err)?;

    Ok(lesson)
}

/// Lessons starting inside `[from, to)` with their reservation counts,
/// ordered by start time.
pub async fn list_lessons_in_window(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> StudioResult<Vec<LessonWithCount>> {
    let lessons = sqlx::query_as::<_, LessonWithCount>(
        r#"
        SELECT l.id, l.external_event_id, l.title, l.instructor_name, l.difficulty,
               l.capacity, l.lesson_type, l.start_time, l.end_time, l.description,
               COUNT(r.id) AS reserved_count
        FROM lessons l
        LEFT JOIN reservations r ON r.lesson_id = l.id
        WHERE l.start_time >= $1 AND l.start_time < $2
        GROUP BY l.id
        ORDER BY l.start_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
    .map_err(sql_err)?;

    Ok(lessons)
}
