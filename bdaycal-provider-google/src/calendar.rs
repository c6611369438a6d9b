//! Google Calendar API provider.
//!
//! Listing expands recurring series into instances (singleEvents), then
//! folds each instance back onto its series id, so one yearly series
//! surfaces as exactly one event per queried year and mutations always
//! target the series rather than a single occurrence.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::StatusCode;
use url::Url;

use bdaycal_core::{BdayCalError, BdayCalResult, CalendarService, NewEvent, RemoteEvent};

use crate::session::Session;
use crate::types::{EventDateSpec, EventInsert, EventsResponse};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct GoogleCalendar {
    session: Arc<Session>,
    http: reqwest::Client,
}

impl GoogleCalendar {
    pub fn new(session: Arc<Session>) -> Self {
        GoogleCalendar {
            session,
            http: reqwest::Client::new(),
        }
    }

    /// Build an API url with percent-encoded path segments (calendar
    /// ids can contain '#', which would otherwise start a fragment).
    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> BdayCalResult<Url> {
        let mut url = Url::parse(CALENDAR_API_BASE)
            .map_err(|e| BdayCalError::Calendar(format!("Invalid API base url: {e}")))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| BdayCalError::Calendar("Invalid API base url".into()))?;
            segments.extend(["calendars", calendar_id, "events"]);
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl CalendarService for GoogleCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BdayCalResult<Vec<RemoteEvent>> {
        let url = self.events_url(calendar_id, None)?;
        let time_min = format!("{start}T00:00:00Z");
        let time_max = format!("{end}T00:00:00Z");

        let mut events = Vec::new();
        let mut seen_series: HashSet<String> = HashSet::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.session.access_token().await?;

            let mut query = vec![
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("maxResults", "250"),
            ];
            if let Some(page_token) = page_token.as_deref() {
                query.push(("pageToken", page_token));
            }

            let response = self
                .http
                .get(url.clone())
                .bearer_auth(token)
                .query(&query)
                .send()
                .await
                .map_err(|e| BdayCalError::Calendar(format!("Events request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(BdayCalError::Calendar(format!(
                    "Events list for '{calendar_id}' returned {}",
                    response.status()
                )));
            }

            let page: EventsResponse = response
                .json()
                .await
                .map_err(|e| BdayCalError::Calendar(format!("Failed to parse events: {e}")))?;

            for event in page.items {
                // Timed events are never ours; only all-day starts count
                let Some(date) = event.start.as_ref().and_then(|s| s.date) else {
                    continue;
                };
                let series_id = event.series_id().to_string();
                if !seen_series.insert(series_id.clone()) {
                    continue;
                }

                events.push(RemoteEvent {
                    id: series_id,
                    title: event.summary,
                    start: date,
                    description: event.description.unwrap_or_default(),
                });
            }

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(events)
    }

    async fn create_yearly_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> BdayCalResult<String> {
        let token = self.session.access_token().await?;
        let url = self.events_url(calendar_id, None)?;

        // All-day events use an exclusive end date: the following day
        let end = event
            .start
            .checked_add_days(Days::new(1))
            .ok_or_else(|| BdayCalError::Calendar(format!("Start date {} overflows", event.start)))?;

        let body = EventInsert {
            summary: event.title.clone(),
            description: event.description.clone(),
            start: EventDateSpec { date: event.start },
            end: EventDateSpec { date: end },
            recurrence: vec!["RRULE:FREQ=YEARLY".to_string()],
            transparency: "transparent".to_string(),
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| BdayCalError::Calendar(format!("Insert request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BdayCalError::Calendar(format!(
                "Insert of '{}' returned {}",
                event.title,
                response.status()
            )));
        }

        #[derive(serde::Deserialize)]
        struct Created {
            id: String,
        }

        let created: Created = response
            .json()
            .await
            .map_err(|e| BdayCalError::Calendar(format!("Failed to parse insert response: {e}")))?;

        Ok(created.id)
    }

    async fn set_description(
        &self,
        calendar_id: &str,
        event_id: &str,
        description: &str,
    ) -> BdayCalResult<()> {
        let token = self.session.access_token().await?;
        let url = self.events_url(calendar_id, Some(event_id))?;

        let response = self
            .http
            .patch(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "description": description }))
            .send()
            .await
            .map_err(|e| BdayCalError::Calendar(format!("Patch request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BdayCalError::Calendar(format!(
                "Patch of '{event_id}' returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> BdayCalResult<()> {
        let token = self.session.access_token().await?;
        let url = self.events_url(calendar_id, Some(event_id))?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BdayCalError::Calendar(format!("Delete request failed: {e}")))?;

        let status = response.status();

        // Already gone counts as deleted
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(());
        }

        if !status.is_success() {
            return Err(BdayCalError::Calendar(format!(
                "Delete of '{event_id}' returned {status}"
            )));
        }

        Ok(())
    }
}
