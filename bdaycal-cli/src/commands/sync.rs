use anyhow::Result;
use chrono::Local;

use bdaycal_core::report::send_report;

use crate::commands::load_services;

pub async fn run(no_report: bool) -> Result<()> {
    let services = load_services()?;
    let today = Local::now().date_naive();

    let outcome = bdaycal_core::sync::run(
        &services.directory,
        &services.calendar,
        &services.config,
        today,
    )
    .await;

    if outcome.has_changes() {
        let (created, updated, deleted) = outcome.counts();
        println!("Synced: {} created, {} updated, {} deleted", created, updated, deleted);
    } else {
        println!("Calendar is in sync.");
    }

    if !no_report {
        if let Some(recipient) = services.config.report_recipient() {
            if send_report(&services.mailer, recipient, &outcome).await {
                println!("Report sent to {recipient}.");
            } else {
                println!("Report to {recipient} could not be sent.");
            }
        }
    }

    Ok(())
}
