use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use lessonsync_core::errors::StudioError;
use lessonsync_core::models::lesson::LessonType;
use lessonsync_core::models::reservation::ReservationStatus;
use lessonsync_db::mock::MemoryStore;
use lessonsync_db::models::LessonUpsert;
use lessonsync_db::store::StudioStore;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn lesson_upsert(event_id: &str, capacity: i32, start: DateTime<Utc>) -> LessonUpsert {
    LessonUpsert {
        external_event_id: event_id.to_string(),
        title: "パワーヨガ".to_string(),
        instructor_name: "Tetsu".to_string(),
        difficulty: "中級クラス".to_string(),
        capacity,
        lesson_type: LessonType::Normal,
        start_time: start,
        end_time: start + Duration::hours(1),
        description: None,
    }
}

async fn seed_lesson(store: &MemoryStore, capacity: i32, start: DateTime<Utc>) -> Uuid {
    store
        .upsert_lesson(&lesson_upsert("evt-1", capacity, start))
        .await
        .unwrap()
        .id
}

async fn seed_member(store: &MemoryStore, name: &str) -> Uuid {
    store
        .create_member(name, &format!("{name}@example.com"))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_concurrent_bookings_never_exceed_capacity() {
    let store = Arc::new(MemoryStore::new());
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 3, now + Duration::days(1)).await;

    let mut members = Vec::new();
    for i in 0..5 {
        members.push(seed_member(&store, &format!("member{i}")).await);
    }

    let mut handles = Vec::new();
    for member_id in members {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create_reservation(lesson_id, member_id, now).await
        }));
    }

    let mut ok = 0;
    let mut full = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(StudioError::LessonFull) => full += 1,
            Err(other) => panic!("unexpected booking failure: {other}"),
        }
    }

    assert_eq!(ok, 3);
    assert_eq!(full, 2);
    assert_eq!(store.reservation_count(lesson_id).await, 3);
}

#[tokio::test]
async fn test_duplicate_booking_rejected() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 10, now + Duration::days(1)).await;
    let member_id = seed_member(&store, "hanako").await;

    store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap();
    let err = store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap_err();

    assert!(matches!(err, StudioError::AlreadyReserved));
    assert_eq!(store.reservation_count(lesson_id).await, 1);
}

#[tokio::test]
async fn test_cancellation_frees_a_seat_immediately() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 1, now + Duration::days(1)).await;
    let first = seed_member(&store, "first").await;
    let second = seed_member(&store, "second").await;

    let reservation = store.create_reservation(lesson_id, first, now).await.unwrap();
    let err = store
        .create_reservation(lesson_id, second, now)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::LessonFull));

    store.delete_reservation(reservation.id).await.unwrap();
    store.create_reservation(lesson_id, second, now).await.unwrap();
    assert_eq!(store.reservation_count(lesson_id).await, 1);
}

#[tokio::test]
async fn test_booking_inside_cutoff_window_fails() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 10, now + Duration::minutes(30)).await;
    let member_id = seed_member(&store, "latecomer").await;

    let err = store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::WindowClosed));
}

#[tokio::test]
async fn test_personal_lesson_rejects_direct_booking() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let mut up = lesson_upsert("evt-personal", 1, now + Duration::days(1));
    up.lesson_type = LessonType::Personal;
    let lesson_id = store.upsert_lesson(&up).await.unwrap().id;
    let member_id = seed_member(&store, "hanako").await;

    let err = store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NotBookable(_)));
}

#[tokio::test]
async fn test_cancel_missing_reservation_is_not_found() {
    let store = MemoryStore::new();
    let err = store.delete_reservation(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StudioError::NotFound(_)));
}

#[tokio::test]
async fn test_upsert_preserves_identity_across_runs() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let start = now + Duration::days(1);

    let first = store
        .upsert_lesson(&lesson_upsert("evt-1", 10, start))
        .await
        .unwrap();
    let mut changed = lesson_upsert("evt-1", 12, start);
    changed.title = "アロマヨガ".to_string();
    let second = store.upsert_lesson(&changed).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.capacity, 12);
    assert_eq!(second.title, "アロマヨガ");
    assert_eq!(store.all_lessons().await.len(), 1);
}

#[tokio::test]
async fn test_lesson_delete_cascades_to_reservations() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 10, now + Duration::days(1)).await;
    let member_id = seed_member(&store, "hanako").await;
    store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap();

    assert!(store.delete_lesson_by_event_id("evt-1").await.unwrap());
    assert_eq!(store.reservation_count(lesson_id).await, 0);
    // Deleting again is idempotent, not an error.
    assert!(!store.delete_lesson_by_event_id("evt-1").await.unwrap());
}

#[tokio::test]
async fn test_scan_candidates_are_limited_to_the_day() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let member_id = seed_member(&store, "hanako").await;

    let today = store
        .upsert_lesson(&lesson_upsert("evt-today", 10, now + Duration::hours(3)))
        .await
        .unwrap();
    let tomorrow = store
        .upsert_lesson(&lesson_upsert("evt-tomorrow", 10, now + Duration::days(2)))
        .await
        .unwrap();

    store.create_reservation(today.id, member_id, now).await.unwrap();
    store.create_reservation(tomorrow.id, member_id, now).await.unwrap();

    let candidates = store
        .find_scan_candidates(member_id, now, now + Duration::hours(12))
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].lesson_id, today.id);
    assert_eq!(candidates[0].status, ReservationStatus::Confirmed);
    assert_eq!(candidates[0].member_name, "hanako");
}

#[tokio::test]
async fn test_set_attendance_round_trip() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let lesson_id = seed_lesson(&store, 10, now + Duration::hours(3)).await;
    let member_id = seed_member(&store, "hanako").await;
    let reservation = store
        .create_reservation(lesson_id, member_id, now)
        .await
        .unwrap();

    store
        .set_attendance(reservation.id, ReservationStatus::Attended)
        .await
        .unwrap();
    let candidates = store
        .find_scan_candidates(member_id, now, now + Duration::hours(12))
        .await
        .unwrap();
    assert_eq!(candidates[0].status, ReservationStatus::Attended);

    // Staff correction back to confirmed.
    store
        .set_attendance(reservation.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    let candidates = store
        .find_scan_candidates(member_id, now, now + Duration::hours(12))
        .await
        .unwrap();
    assert_eq!(candidates[0].status, ReservationStatus::Confirmed);
}
