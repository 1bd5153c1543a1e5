//! Calendar event feed abstraction and the Google Calendar client.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use lessonsync_core::errors::{StudioError, StudioResult};
use serde::Deserialize;

/// Time window a sync pass covers.
#[derive(Debug, Clone, Copy)]
pub struct SyncWindow {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
}

impl SyncWindow {
    /// The fixed reconciliation window: one day back (to catch same-day
    /// edits) through three months ahead, bounding sync cost.
    pub fn from_now(now: DateTime<Utc>) -> Self {
        let time_max = now
            .checked_add_months(Months::new(3))
            .unwrap_or(now + Duration::days(92));
        Self {
            time_min: now - Duration::days(1),
            time_max,
        }
    }
}

/// Start or end of a feed event: a concrete instant, or a bare date for
/// all-day entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTime {
    Timed(DateTime<Utc>),
    AllDay(NaiveDate),
}

/// Provider-agnostic calendar event, the unit the sync engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEvent {
    pub id: String,
    /// The feed reports cancellations as events flagged cancelled rather
    /// than by omission.
    pub cancelled: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<FeedTime>,
    pub end: Option<FeedTime>,
}

/// One page of the feed. `next_page_token` is opaque; its absence marks the
/// last page.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<FeedEvent>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait EventFeed: Send + Sync {
    /// Fetches one page of events inside `window`, cancelled events
    /// included. Pagination is sequential: pass the previous page's token,
    /// or `None` for the first page.
    async fn fetch_page(
        &self,
        window: &SyncWindow,
        page_token: Option<&str>,
    ) -> StudioResult<EventPage>;
}

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";
const MAX_RESULTS: &str = "2500";

/// Google Calendar events-list client.
pub struct GoogleCalendarFeed {
    client: reqwest::Client,
    api_key: String,
    calendar_id: String,
}

impl GoogleCalendarFeed {
    pub fn new(api_key: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            calendar_id: calendar_id.into(),
        }
    }
}

#[async_trait]
impl EventFeed for GoogleCalendarFeed {
    async fn fetch_page(
        &self,
        window: &SyncWindow,
        page_token: Option<&str>,
    ) -> StudioResult<EventPage> {
        let url = format!(
            "{EVENTS_URL}/{}/events",
            urlencode(&self.calendar_id)
        );

        tracing::debug!("Fetching calendar page (token present: {})", page_token.is_some());

        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("timeMin", &window.time_min.to_rfc3339()),
                ("timeMax", &window.time_max.to_rfc3339()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("showDeleted", "true"),
                ("maxResults", MAX_RESULTS),
            ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StudioError::Feed(format!("calendar request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::Feed(format!(
                "calendar responded with {status}: {body}"
            )));
        }

        let page: GoogleEventsPage = response
            .json()
            .await
            .map_err(|e| StudioError::Feed(format!("malformed calendar response: {e}")))?;

        Ok(EventPage {
            events: page
                .items
                .unwrap_or_default()
                .into_iter()
                .map(FeedEvent::from)
                .collect(),
            next_page_token: page.next_page_token,
        })
    }
}

fn urlencode(s: &str) -> String {
    // Calendar ids are email-like; '@' and ':' are the characters that
    // actually occur and need escaping in a path segment.
    s.replace('%', "%25")
        .replace('@', "%40")
        .replace(':', "%3A")
        .replace('/', "%2F")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventsPage {
    items: Option<Vec<GoogleEvent>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    id: String,
    status: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<GoogleEventTime>,
    end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    date_time: Option<DateTime<Utc>>,
    date: Option<NaiveDate>,
}

impl From<GoogleEvent> for FeedEvent {
    fn from(event: GoogleEvent) -> Self {
        FeedEvent {
            cancelled: event.status.as_deref() == Some("cancelled"),
            summary: event.summary,
            description: event.description,
            start: event.start.and_then(GoogleEventTime::into_feed_time),
            end: event.end.and_then(GoogleEventTime::into_feed_time),
            id: event.id,
        }
    }
}

impl GoogleEventTime {
    fn into_feed_time(self) -> Option<FeedTime> {
        match (self.date_time, self.date) {
            (Some(instant), _) => Some(FeedTime::Timed(instant)),
            (None, Some(date)) => Some(FeedTime::AllDay(date)),
            (None, None) => None,
        }
    }
}
