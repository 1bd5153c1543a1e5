use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use lessonsync_calendar::sync::SyncEngine;
use lessonsync_core::models::sync::SyncOutcome;

use crate::{middleware::error_handling::AppError, ApiState};

/// Runs one calendar reconciliation pass and reports its counts.
///
/// Partial failures (single rows that could not be written) do not fail the
/// request; they surface in the outcome's `last_error`. A feed failure does.
#[axum::debug_handler]
pub async fn run_sync(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SyncOutcome>, AppError> {
    let engine = SyncEngine::new(
        state.feed.as_ref(),
        state.store.as_ref(),
        state.studio_offset,
    );
    let outcome = engine.run(Utc::now()).await?;

    Ok(Json(outcome))
}
