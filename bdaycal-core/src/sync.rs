//! Run orchestration: plan, then apply.
//!
//! Everything is rebuilt from the live directory and calendar on every
//! run; there is no persisted diff state. That rebuild is what makes
//! runs idempotent and partial failures safe — whatever a run leaves
//! undone, the next run picks up from scratch.

use chrono::{Datelike, NaiveDate};

use crate::apply::{SyncOutcome, apply_actions};
use crate::builder::build_anniversary_records;
use crate::calendar::CalendarService;
use crate::config::SyncConfig;
use crate::directory::DirectoryService;
use crate::extract::fetch_calendar_records;
use crate::reconcile::{SyncAction, reconcile};

/// Build both record sets for `today`'s year and compute the action
/// list without applying anything.
pub async fn plan<D, C>(
    directory: &D,
    calendar: &C,
    config: &SyncConfig,
    today: NaiveDate,
) -> Vec<SyncAction>
where
    D: DirectoryService,
    C: CalendarService,
{
    let year = today.year();
    let anniversaries = build_anniversary_records(directory, config, year).await;
    let existing = fetch_calendar_records(calendar, &config.calendar_id, year).await;

    reconcile(&anniversaries, &existing)
}

/// Plan and apply in one pass. Interruptions mid-list leave the
/// calendar partially updated but consistent; no action depends on
/// another, and the remainder converges on the next run.
pub async fn run<D, C>(
    directory: &D,
    calendar: &C,
    config: &SyncConfig,
    today: NaiveDate,
) -> SyncOutcome
where
    D: DirectoryService,
    C: CalendarService,
{
    let actions = plan(directory, calendar, config, today).await;
    apply_actions(calendar, &config.calendar_id, today.year(), actions).await
}
