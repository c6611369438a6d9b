//! Directory (contacts) service interface.
//!
//! Providers convert their API responses into these types; the builder
//! works exclusively with them and never sees provider wire formats.

use async_trait::async_trait;

use crate::error::BdayCalResult;
use crate::record::MonthDay;

/// A contacts directory, fetched page by page.
#[async_trait]
pub trait DirectoryService {
    /// Fetch one page of contacts. `page_token` is None for the first
    /// page; the returned token, if any, requests the next one.
    async fn list_contacts(&self, page_token: Option<&str>) -> BdayCalResult<ContactPage>;
}

#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Contact {
    /// Stable identifier, e.g. "people/c1234". Used as the identity tag.
    pub id: String,
    pub display_name: String,
    pub birthdays: Vec<PartialDate>,
    pub events: Vec<NamedDate>,
}

/// A possibly-partial date as directories store them: any component may
/// be missing (year-less birthdays are common, day-less ones exist too).
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    /// The recurring month/day, if both components are present and valid.
    /// A date missing either one cannot recur yearly and yields None.
    pub fn month_day(&self) -> Option<MonthDay> {
        MonthDay::new(self.month?, self.day?)
    }
}

/// A labelled contact event ("Hochzeitstag", "Jubiläum", ...).
#[derive(Debug, Clone)]
pub struct NamedDate {
    pub label: String,
    pub date: PartialDate,
}
