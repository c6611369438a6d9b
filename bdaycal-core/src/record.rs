//! Normalized anniversary and calendar records.
//!
//! Both record kinds are rebuilt from live sources on every run; nothing
//! here is persisted. Matching between the two sides happens on the
//! `(identity_tag, title)` string pair plus month/day equality — see
//! `reconcile`.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A recurring anniversary date. The year is deliberately absent:
/// two records refer to the same anniversary iff their month and day
/// are equal, regardless of which year either side was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(MonthDay { month, day })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The concrete date this anniversary falls on in `year`, or None
    /// for dates the year doesn't have (Feb 29 outside leap years).
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnniversaryKind {
    Birthday,
    /// A named contact event ("Hochzeitstag", "Anniversary", ...).
    /// The label becomes part of the event title.
    NamedEvent(String),
}

/// One dated, recurring event derived from a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct AnniversaryRecord {
    /// Stable external identifier of the owning contact
    /// (e.g. "people/c1234"). Opaque; stable across runs.
    pub identity_tag: String,
    pub kind: AnniversaryKind,
    /// Display name at fetch time. Not an identity — it may change,
    /// and when it does the title changes with it.
    pub display_name: String,
    /// Computed display title; also half of the matching key.
    pub title: String,
    pub month_day: MonthDay,
    /// Known only for birthdays whose contact entry carries a year.
    pub birth_year: Option<i32>,
    /// Target description for this run, composed up front so the
    /// reconciler can compare it verbatim against the calendar.
    pub expected_description: String,
}

/// One existing calendar event recognized as managed by this system
/// (its description contains an identity tag).
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRecord {
    /// Opaque handle sufficient to mutate or delete the event.
    /// Held only for the duration of one run.
    pub event_id: String,
    pub identity_tag: String,
    pub title: String,
    pub month_day: MonthDay,
    pub description: String,
}
