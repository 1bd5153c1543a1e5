//! Calendar reconciliation.
//!
//! One pass pages through the feed and converges the lesson catalog on it:
//! cancelled events delete their rows, live events are normalized, parsed,
//! classified, and upserted by external event id. A failure fetching a page
//! aborts the pass; a failure writing one row does not.

use chrono::{DateTime, FixedOffset, Utc};
use lessonsync_core::classify::classify_lesson;
use lessonsync_core::errors::StudioResult;
use lessonsync_core::models::lesson::LessonType;
use lessonsync_core::models::sync::SyncOutcome;
use lessonsync_core::studio::all_day_bounds;
use lessonsync_core::title::{normalize_title, parse_title};
use lessonsync_db::models::LessonUpsert;
use lessonsync_db::store::StudioStore;

use crate::feed::{EventFeed, FeedEvent, FeedTime, SyncWindow};

/// Placeholder summary for events saved without a title.
const UNTITLED: &str = "名称未設定";

pub struct SyncEngine<'a> {
    feed: &'a dyn EventFeed,
    store: &'a dyn StudioStore,
    studio_offset: FixedOffset,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        feed: &'a dyn EventFeed,
        store: &'a dyn StudioStore,
        studio_offset: FixedOffset,
    ) -> Self {
        Self {
            feed,
            store,
            studio_offset,
        }
    }

    /// Runs one reconciliation pass over the fixed lookahead window.
    ///
    /// Events are applied in feed order, so a later occurrence of the same
    /// event id within one pass wins. Re-running against an unchanged feed
    /// leaves the catalog identical.
    pub async fn run(&self, now: DateTime<Utc>) -> StudioResult<SyncOutcome> {
        let window = SyncWindow::from_now(now);
        let mut outcome = SyncOutcome::default();
        let mut page_token: Option<String> = None;

        tracing::info!(
            "Starting calendar sync: window {} .. {}",
            window.time_min,
            window.time_max
        );

        loop {
            let page = self.feed.fetch_page(&window, page_token.as_deref()).await?;

            for event in page.events {
                self.apply_event(event, &mut outcome).await;
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        tracing::info!(
            "Calendar sync finished: {} upserted, {} deleted",
            outcome.upserted,
            outcome.deleted
        );
        Ok(outcome)
    }

    async fn apply_event(&self, event: FeedEvent, outcome: &mut SyncOutcome) {
        if event.cancelled {
            match self.store.delete_lesson_by_event_id(&event.id).await {
                Ok(true) => outcome.deleted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to delete lesson for event {}: {}", event.id, e);
                    outcome.last_error = Some(e.to_string());
                }
            }
            return;
        }

        let raw_summary = event.summary.as_deref().unwrap_or(UNTITLED);
        let parsed = parse_title(&normalize_title(raw_summary));

        let (all_day, start_time, end_time) = match (event.start, event.end) {
            (Some(FeedTime::AllDay(date)), _) => {
                let (start, end) = all_day_bounds(date, self.studio_offset);
                (true, start, end)
            }
            (Some(FeedTime::Timed(start)), Some(FeedTime::Timed(end))) => (false, start, end),
            _ => {
                // An event without a usable time pair cannot become a slot.
                tracing::debug!("Skipping event {} without usable times", event.id);
                return;
            }
        };

        let lesson_type = classify_lesson(all_day, raw_summary, &parsed.title);
        let capacity = match lesson_type {
            LessonType::Personal => 1,
            _ => parsed.capacity,
        };

        let upsert = LessonUpsert {
            external_event_id: event.id,
            title: parsed.title,
            instructor_name: parsed.instructor,
            difficulty: parsed.difficulty,
            capacity,
            lesson_type,
            start_time,
            end_time,
            description: event.description,
        };

        match self.store.upsert_lesson(&upsert).await {
            Ok(_) => outcome.upserted += 1,
            Err(e) => {
                tracing::error!(
                    "Failed to upsert lesson for event {}: {}",
                    upsert.external_event_id,
                    e
                );
                outcome.last_error = Some(e.to_string());
            }
        }
    }
}
