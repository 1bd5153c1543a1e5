//! In-memory [`StudioStore`] for tests.
//!
//! One mutex guards the whole catalog, so `create_reservation` holds its
//! lock across the precondition checks and the insert — the same critical
//! section the Postgres store gets from its SERIALIZABLE transaction.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lessonsync_core::booking::ensure_bookable;
use lessonsync_core::checkin::ScanCandidate;
use lessonsync_core::errors::{StudioError, StudioResult};
use lessonsync_core::models::reservation::ReservationStatus;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    DbLesson, DbMember, DbReservation, LessonUpsert, LessonWithCount, ReservationWithLesson,
};
use crate::store::StudioStore;

#[derive(Default)]
struct Inner {
    lessons: HashMap<Uuid, DbLesson>,
    event_index: HashMap<String, Uuid>,
    members: HashMap<Uuid, DbMember>,
    reservations: HashMap<Uuid, DbReservation>,
    poisoned_events: HashSet<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes upserts for the given external event id fail, to exercise the
    /// sync engine's per-row error handling.
    pub async fn poison_event(&self, external_event_id: &str) {
        let mut inner = self.inner.lock().await;
        inner.poisoned_events.insert(external_event_id.to_string());
    }

    /// Snapshot of every lesson row, sorted by start time. Used by tests to
    /// compare catalog state across sync runs.
    pub async fn all_lessons(&self) -> Vec<DbLesson> {
        let inner = self.inner.lock().await;
        let mut lessons: Vec<_> = inner.lessons.values().cloned().collect();
        lessons.sort_by_key(|l| (l.start_time, l.id));
        lessons
    }

    pub async fn reservation_count(&self, lesson_id: Uuid) -> usize {
        let inner = self.inner.lock().await;
        inner
            .reservations
            .values()
            .filter(|r| r.lesson_id == lesson_id)
            .count()
    }
}

#[async_trait]
impl StudioStore for MemoryStore {
    async fn upsert_lesson(&self, up: &LessonUpsert) -> StudioResult<DbLesson> {
        let mut inner = self.inner.lock().await;

        if inner.poisoned_events.contains(&up.external_event_id) {
            return Err(StudioError::Database(eyre::eyre!(
                "simulated write failure for event {}",
                up.external_event_id
            )));
        }

        let id = inner
            .event_index
            .get(&up.external_event_id)
            .copied()
            .unwrap_or_else(Uuid::new_v4);
        let created_at = inner
            .lessons
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);

        let lesson = DbLesson {
            id,
            external_event_id: Some(up.external_event_id.clone()),
            title: up.title.clone(),
            instructor_name: up.instructor_name.clone(),
            difficulty: up.difficulty.clone(),
            capacity: up.capacity,
            lesson_type: up.lesson_type.as_str().to_string(),
            start_time: up.start_time,
            end_time: up.end_time,
            description: up.description.clone(),
            created_at,
        };

        inner.event_index.insert(up.external_event_id.clone(), id);
        inner.lessons.insert(id, lesson.clone());
        Ok(lesson)
    }

    async fn delete_lesson_by_event_id(&self, external_event_id: &str) -> StudioResult<bool> {
        let mut inner = self.inner.lock().await;
        let Some(id) = inner.event_index.remove(external_event_id) else {
            return Ok(false);
        };
        inner.lessons.remove(&id);
        // Lesson deletion cascades to its reservations.
        inner.reservations.retain(|_, r| r.lesson_id != id);
        Ok(true)
    }

    async fn get_lesson(&self, id: Uuid) -> StudioResult<Option<DbLesson>> {
        let inner = self.inner.lock().await;
        Ok(inner.lessons.get(&id).cloned())
    }

    async fn get_lesson_by_event_id(
        &self,
        external_event_id: &str,
    ) -> StudioResult<Option<DbLesson>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .event_index
            .get(external_event_id)
            .and_then(|id| inner.lessons.get(id))
            .cloned())
    }

    async fn list_lessons(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StudioResult<Vec<LessonWithCount>> {
        let inner = self.inner.lock().await;
        let mut lessons: Vec<LessonWithCount> = inner
            .lessons
            .values()
            .filter(|l| l.start_time >= from && l.start_time < to)
            .map(|l| LessonWithCount {
                id: l.id,
                external_event_id: l.external_event_id.clone(),
                title: l.title.clone(),
                instructor_name: l.instructor_name.clone(),
                difficulty: l.difficulty.clone(),
                capacity: l.capacity,
                lesson_type: l.lesson_type.clone(),
                start_time: l.start_time,
                end_time: l.end_time,
                description: l.description.clone(),
                reserved_count: inner
                    .reservations
                    .values()
                    .filter(|r| r.lesson_id == l.id)
                    .count() as i64,
            })
            .collect();
        lessons.sort_by_key(|l| l.start_time);
        Ok(lessons)
    }

    async fn create_member(&self, full_name: &str, email: &str) -> StudioResult<DbMember> {
        let mut inner = self.inner.lock().await;
        let member = DbMember {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_member(&self, id: Uuid) -> StudioResult<Option<DbMember>> {
        let inner = self.inner.lock().await;
        Ok(inner.members.get(&id).cloned())
    }

    async fn create_reservation(
        &self,
        lesson_id: Uuid,
        member_id: Uuid,
        now: DateTime<Utc>,
    ) -> StudioResult<DbReservation> {
        let mut inner = self.inner.lock().await;

        let lesson = inner
            .lessons
            .get(&lesson_id)
            .ok_or_else(|| StudioError::NotFound(format!("Lesson with ID {lesson_id} not found")))?
            .clone();

        if !inner.members.contains_key(&member_id) {
            return Err(StudioError::Validation("unknown lesson or member".to_string()));
        }

        ensure_bookable(lesson.kind(), lesson.start_time, now)?;

        if inner
            .reservations
            .values()
            .any(|r| r.lesson_id == lesson_id && r.member_id == member_id)
        {
            return Err(StudioError::AlreadyReserved);
        }

        let reserved = inner
            .reservations
            .values()
            .filter(|r| r.lesson_id == lesson_id)
            .count() as i64;
        if reserved >= i64::from(lesson.capacity) {
            return Err(StudioError::LessonFull);
        }

        let reservation = DbReservation {
            id: Uuid::new_v4(),
            lesson_id,
            member_id,
            status: ReservationStatus::Confirmed.as_str().to_string(),
            created_at: now,
        };
        inner.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: Uuid) -> StudioResult<()> {
        let mut inner = self.inner.lock().await;
        inner
            .reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StudioError::NotFound(format!("Reservation with ID {id} not found")))
    }

    async fn list_member_reservations(
        &self,
        member_id: Uuid,
        from: DateTime<Utc>,
    ) -> StudioResult<Vec<ReservationWithLesson>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<ReservationWithLesson> = inner
            .reservations
            .values()
            .filter(|r| r.member_id == member_id)
            .filter_map(|r| {
                let lesson = inner.lessons.get(&r.lesson_id)?;
                if lesson.start_time < from {
                    return None;
                }
                Some(ReservationWithLesson {
                    reservation_id: r.id,
                    status: r.status.clone(),
                    created_at: r.created_at,
                    lesson_id: lesson.id,
                    title: lesson.title.clone(),
                    instructor_name: lesson.instructor_name.clone(),
                    difficulty: lesson.difficulty.clone(),
                    lesson_type: lesson.lesson_type.clone(),
                    start_time: lesson.start_time,
                    end_time: lesson.end_time,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.start_time);
        Ok(rows)
    }

    async fn find_scan_candidates(
        &self,
        member_id: Uuid,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> StudioResult<Vec<ScanCandidate>> {
        let inner = self.inner.lock().await;
        let mut candidates: Vec<ScanCandidate> = inner
            .reservations
            .values()
            .filter(|r| r.member_id == member_id)
            .filter_map(|r| {
                let lesson = inner.lessons.get(&r.lesson_id)?;
                if lesson.start_time < day_start || lesson.start_time >= day_end {
                    return None;
                }
                let member = inner.members.get(&r.member_id)?;
                Some(ScanCandidate {
                    reservation_id: r.id,
                    member_id: r.member_id,
                    member_name: member.full_name.clone(),
                    lesson_id: lesson.id,
                    lesson_title: lesson.title.clone(),
                    lesson_start: lesson.start_time,
                    status: r.attendance(),
                })
            })
            .collect();
        candidates.sort_by_key(|c| c.lesson_start);
        Ok(candidates)
    }

    async fn set_attendance(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> StudioResult<()> {
        let mut inner = self.inner.lock().await;
        let reservation = inner.reservations.get_mut(&reservation_id).ok_or_else(|| {
            StudioError::NotFound(format!("Reservation with ID {reservation_id} not found"))
        })?;
        reservation.status = status.as_str().to_string();
        Ok(())
    }
}
