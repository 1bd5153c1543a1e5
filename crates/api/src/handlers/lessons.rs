use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Months, Utc};
use std::sync::Arc;

use lessonsync_core::models::lesson::{LessonResponse, LessonType, LessonWindowQuery};
use lessonsync_core::studio::local_day_bounds;
use lessonsync_db::models::LessonWithCount;

use crate::{middleware::error_handling::AppError, ApiState};

/// How far ahead the catalog reaches when the caller gives no upper bound.
const DEFAULT_LOOKAHEAD_MONTHS: u32 = 2;

#[axum::debug_handler]
pub async fn list_lessons(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LessonWindowQuery>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    // Default window: from the start of the studio-local day, two months out.
    let (today_start, _) = local_day_bounds(Utc::now(), state.studio_offset);
    let from = query.from.unwrap_or(today_start);
    let to = query.to.unwrap_or_else(|| {
        from.checked_add_months(Months::new(DEFAULT_LOOKAHEAD_MONTHS))
            .unwrap_or(from + Duration::days(62))
    });

    let lessons = state.store.list_lessons(from, to).await?;
    let response = lessons.into_iter().map(to_response).collect();

    Ok(Json(response))
}

fn to_response(row: LessonWithCount) -> LessonResponse {
    let lesson_type = LessonType::parse(&row.lesson_type).unwrap_or(LessonType::Training);
    // Only normal lessons are bookable, so only they expose seats left.
    let remaining = match lesson_type {
        LessonType::Normal => (i64::from(row.capacity) - row.reserved_count).max(0),
        _ => 0,
    };

    LessonResponse {
        id: row.id,
        external_event_id: row.external_event_id,
        title: row.title,
        instructor_name: row.instructor_name,
        difficulty: row.difficulty,
        capacity: row.capacity,
        lesson_type,
        start_time: row.start_time,
        end_time: row.end_time,
        description: row.description,
        reserved_count: row.reserved_count,
        remaining,
    }
}
