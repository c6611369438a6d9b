pub mod status;
pub mod sync;

use std::sync::Arc;

use anyhow::{Context, Result};
use bdaycal_core::SyncConfig;
use bdaycal_provider_google::{GmailMailer, GoogleCalendar, GoogleDirectory, Session};

pub struct Services {
    pub config: SyncConfig,
    pub directory: GoogleDirectory,
    pub calendar: GoogleCalendar,
    pub mailer: GmailMailer,
}

pub fn load_services() -> Result<Services> {
    let config = SyncConfig::load().context("Failed to load configuration")?;
    let session = Arc::new(Session::load().context("Failed to load Google session")?);

    Ok(Services {
        config,
        directory: GoogleDirectory::new(session.clone()),
        calendar: GoogleCalendar::new(session.clone()),
        mailer: GmailMailer::new(session),
    })
}
