use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/checkin/scan", post(handlers::checkin::scan))
        .route(
            "/api/reservations/:id/checkin/revert",
            post(handlers::checkin::revert_check_in),
        )
}
