//! Calendar record extraction.
//!
//! Lists the target year's events and keeps only those recognizable as
//! managed by this system, i.e. those whose description yields an
//! identity tag.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::CalendarService;
use crate::identity::extract_identity_tag;
use crate::record::{CalendarRecord, MonthDay};

/// Fetch all managed calendar records for `year`.
///
/// The listing window is [Jan 1 year, Jan 1 year+1). Events without an
/// identity tag in their description are not ours and are dropped. A
/// failed listing (calendar missing, inaccessible) yields an empty set,
/// logged but never fatal — the run then simply creates nothing and
/// deletes nothing it can't see.
pub async fn fetch_calendar_records<C: CalendarService>(
    calendar: &C,
    calendar_id: &str,
    year: i32,
) -> Vec<CalendarRecord> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) else {
        warn!("Year {year} is out of range, skipping calendar fetch");
        return Vec::new();
    };

    let events = match calendar.list_events(calendar_id, start, end).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Calendar listing failed, treating '{calendar_id}' as empty: {e}");
            return Vec::new();
        }
    };

    debug!("Fetched {} event(s) from calendar '{calendar_id}'", events.len());

    events
        .into_iter()
        .filter_map(|event| {
            let identity_tag = extract_identity_tag(&event.description)?.to_string();
            Some(CalendarRecord {
                event_id: event.id,
                identity_tag,
                title: event.title,
                month_day: MonthDay::from_date(event.start),
                description: event.description,
            })
        })
        .collect()
}
