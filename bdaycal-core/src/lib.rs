//! Core types and reconciliation engine for the bdaycal ecosystem.
//!
//! This crate turns a contacts directory into anniversary records,
//! recognizes which existing calendar events it manages, and computes
//! and applies the create/update/delete actions that make the calendar
//! mirror the contacts. All I/O goes through the `DirectoryService`,
//! `CalendarService` and `ReportMailer` traits; providers live in
//! separate crates.

pub mod apply;
pub mod builder;
pub mod calendar;
pub mod compose;
pub mod config;
pub mod directory;
pub mod error;
pub mod extract;
pub mod identity;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod sync;

pub use apply::SyncOutcome;
pub use calendar::{CalendarService, NewEvent, RemoteEvent};
pub use config::{DescriptionTemplates, SyncConfig};
pub use directory::{Contact, ContactPage, DirectoryService, NamedDate, PartialDate};
pub use error::{BdayCalError, BdayCalResult};
pub use reconcile::SyncAction;
pub use record::{AnniversaryKind, AnniversaryRecord, CalendarRecord, MonthDay};
pub use report::ReportMailer;
