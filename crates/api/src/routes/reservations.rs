use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reservations",
            post(handlers::reservations::book_lesson),
        )
        .route(
            "/api/reservations/:id",
            delete(handlers::reservations::cancel_reservation),
        )
        .route(
            "/api/members/:id/reservations",
            get(handlers::reservations::list_member_reservations),
        )
}
