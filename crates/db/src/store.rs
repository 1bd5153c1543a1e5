//! Store abstraction over the lesson/reservation catalog.
//!
//! Every mutation in the system (sync upsert/delete, booking, cancellation,
//! attendance) goes through this trait; the capacity and duplicate
//! invariants are enforced by its implementations. Handlers and the sync
//! engine receive a store rather than reaching for a connection directly,
//! so tests substitute the in-memory implementation in [`crate::mock`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lessonsync_core::checkin::ScanCandidate;
use lessonsync_core::errors::StudioResult;
use lessonsync_core::models::reservation::ReservationStatus;
use uuid::Uuid;

use crate::models::{
    DbLesson, DbMember, DbReservation, LessonUpsert, LessonWithCount, ReservationWithLesson,
};
use crate::repositories;
use crate::DbPool;

#[async_trait]
pub trait StudioStore: Send + Sync {
    // Lessons
    async fn upsert_lesson(&self, up: &LessonUpsert) -> StudioResult<DbLesson>;
    async fn delete_lesson_by_event_id(&self, external_event_id: &str) -> StudioResult<bool>;
    async fn get_lesson(&self, id: Uuid) -> StudioResult<Option<DbLesson>>;
    async fn get_lesson_by_event_id(&self, external_event_id: &str)
        -> StudioResult<Option<DbLesson>>;
    async fn list_lessons(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StudioResult<Vec<LessonWithCount>>;

    // Members
    async fn create_member(&self, full_name: &str, email: &str) -> StudioResult<DbMember>;
    async fn get_member(&self, id: Uuid) -> StudioResult<Option<DbMember>>;

    // Reservations. `create_reservation` checks every booking precondition
    // against the committed state, atomically with the insert.
    async fn create_reservation(
        &self,
        lesson_id: Uuid,
        member_id: Uuid,
        now: DateTime<Utc>,
    ) -> StudioResult<DbReservation>;
    async fn delete_reservation(&self, id: Uuid) -> StudioResult<()>;
    async fn list_member_reservations(
        &self,
        member_id: Uuid,
        from: DateTime<Utc>,
    ) -> StudioResult<Vec<ReservationWithLesson>>;
    async fn find_scan_candidates(
        &self,
        member_id: Uuid,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> StudioResult<Vec<ScanCandidate>>;
    async fn set_attendance(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> StudioResult<()>;
}

/// PostgreSQL-backed store, delegating to the repository functions.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudioStore for PgStore {
    async fn upsert_lesson(&self, up: &LessonUpsert) -> StudioResult<DbLesson> {
        repositories::lesson::upsert_lesson(&self.pool, up).await
    }

    async fn delete_lesson_by_event_id(&self, external_event_id: &str) -> StudioResult<bool> {
        repositories::lesson::delete_lesson_by_event_id(&self.pool, external_event_id).await
    }

    async fn get_lesson(&self, id: Uuid) -> StudioResult<Option<DbLesson>> {
        repositories::lesson::get_lesson_by_id(&self.pool, id).await
    }

    async fn get_lesson_by_event_id(
        &self,
        external_event_id: &str,
    ) -> StudioResult<Option<DbLesson>> {
        repositories::lesson::get_lesson_by_event_id(&self.pool, external_event_id).await
    }

    async fn list_lessons(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StudioResult<Vec<LessonWithCount>> {
        repositories::lesson::list_lessons_in_window(&self.pool, from, to).await
    }

    async fn create_member(&self, full_name: &str, email: &str) -> StudioResult<DbMember> {
        repositories::member::create_member(&self.pool, full_name, email).await
    }

    async fn get_member(&self, id: Uuid) -> StudioResult<Option<DbMember>> {
        repositories::member::get_member_by_id(&self.pool, id).await
    }

    async fn create_reservation(
        &self,
        lesson_id: Uuid,
        member_id: Uuid,
        now: DateTime<Utc>,
    ) -> StudioResult<DbReservation> {
        repositories::reservation::create_reservation(&self.pool, lesson_id, member_id, now).await
    }

    async fn delete_reservation(&self, id: Uuid) -> StudioResult<()> {
        repositories::reservation::delete_reservation(&self.pool, id).await
    }

    async fn list_member_reservations(
        &self,
        member_id: Uuid,
        from: DateTime<Utc>,
    ) -> StudioResult<Vec<ReservationWithLesson>> {
        repositories::reservation::list_member_reservations(&self.pool, member_id, from).await
    }

    async fn find_scan_candidates(
        &self,
        member_id: Uuid,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> StudioResult<Vec<ScanCandidate>> {
        repositories::reservation::find_scan_candidates(&self.pool, member_id, day_start, day_end)
            .await
    }

    async fn set_attendance(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> StudioResult<()> {
        repositories::reservation::set_attendance(&self.pool, reservation_id, status).await
    }
}
