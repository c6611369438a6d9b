//! Calendar service interface.
//!
//! All events this system manages are whole-day, yearly-recurring and
//! non-blocking; the trait surface is deliberately that narrow.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::BdayCalResult;

#[async_trait]
pub trait CalendarService {
    /// All events whose start date falls within `[start, end)`.
    async fn list_events(
        &self,
        calendar_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BdayCalResult<Vec<RemoteEvent>>;

    /// Create a yearly-recurring whole-day event series, marked as free
    /// (non-blocking) time. Returns the new event's id.
    async fn create_yearly_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> BdayCalResult<String>;

    /// Replace the description of an existing event. Title and date are
    /// left untouched.
    async fn set_description(
        &self,
        calendar_id: &str,
        event_id: &str,
        description: &str,
    ) -> BdayCalResult<()>;

    /// Delete an event. An event that no longer exists is a success
    /// no-op, not an error.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> BdayCalResult<()>;
}

/// An existing calendar event as observed during one run.
#[derive(Debug, Clone)]
pub struct RemoteEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub description: String,
}

/// Payload for creating a new recurring event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub start: NaiveDate,
    pub description: String,
}
