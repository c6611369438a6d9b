//! Google API wire types and conversions into core types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bdaycal_core::{Contact, NamedDate, PartialDate};

// --- People API ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connections: Vec<Person>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub resource_name: String,
    #[serde(default)]
    pub names: Vec<PersonName>,
    #[serde(default)]
    pub birthdays: Vec<Birthday>,
    #[serde(default)]
    pub events: Vec<PersonEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Birthday {
    pub date: Option<GoogleDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonEvent {
    pub formatted_type: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub date: Option<GoogleDate>,
}

/// Google's partial date: every component is optional (year-less
/// birthdays arrive as {month, day} only; zero also means absent).
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct GoogleDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl From<GoogleDate> for PartialDate {
    fn from(date: GoogleDate) -> Self {
        PartialDate {
            year: date.year.filter(|&y| y != 0),
            month: date.month.filter(|&m| m != 0),
            day: date.day.filter(|&d| d != 0),
        }
    }
}

impl Person {
    pub fn into_contact(self) -> Contact {
        let display_name = self
            .names
            .into_iter()
            .find_map(|n| n.display_name)
            .unwrap_or_default();

        let birthdays = self
            .birthdays
            .into_iter()
            .filter_map(|b| b.date.map(PartialDate::from))
            .collect();

        let events = self
            .events
            .into_iter()
            .filter_map(|e| {
                let date = PartialDate::from(e.date?);
                let label = e.formatted_type.or(e.event_type)?;
                Some(NamedDate { label, date })
            })
            .collect();

        Contact {
            id: self.resource_name,
            display_name,
            birthdays,
            events,
        }
    }
}

// --- Calendar API ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub description: Option<String>,
    pub start: Option<GoogleEventTime>,
    /// For an expanded instance, the id of its recurring series.
    pub recurring_event_id: Option<String>,
}

impl GoogleEvent {
    /// The handle mutations should target: the series for instances,
    /// the event itself otherwise.
    pub fn series_id(&self) -> &str {
        self.recurring_event_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    /// Set for all-day events ("2025-03-15"); absent for timed ones.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInsert {
    pub summary: String,
    pub description: String,
    pub start: EventDateSpec,
    pub end: EventDateSpec,
    pub recurrence: Vec<String>,
    pub transparency: String,
}

#[derive(Debug, Serialize)]
pub struct EventDateSpec {
    pub date: NaiveDate,
}
