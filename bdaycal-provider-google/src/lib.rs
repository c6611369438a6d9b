//! Google providers for bdaycal.
//!
//! Implements the core service traits against the Google REST APIs:
//! People (contacts directory), Calendar (event storage) and Gmail
//! (report delivery), sharing one OAuth session.

pub mod calendar;
pub mod mailer;
pub mod people;
pub mod session;
pub mod types;

pub use calendar::GoogleCalendar;
pub use mailer::GmailMailer;
pub use people::GoogleDirectory;
pub use session::Session;
