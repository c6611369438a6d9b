//! Anniversary record construction from directory data.

use tracing::{debug, warn};

use crate::compose::compose_description;
use crate::config::SyncConfig;
use crate::directory::{Contact, DirectoryService};
use crate::record::{AnniversaryKind, AnniversaryRecord};

/// Fetch all contacts and turn them into anniversary records.
///
/// Pages are fetched until the directory stops returning a continuation
/// token. A page failure ends the fetch early with whatever was
/// accumulated — partial data degrades the run (missing contacts look
/// like deletions next year at worst, and are re-created once the
/// directory recovers), but never aborts it.
pub async fn build_anniversary_records<D: DirectoryService>(
    directory: &D,
    config: &SyncConfig,
    current_year: i32,
) -> Vec<AnniversaryRecord> {
    let mut contacts = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        match directory.list_contacts(page_token.as_deref()).await {
            Ok(page) => {
                contacts.extend(page.contacts);
                match page.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            Err(e) => {
                warn!("Contact fetch failed, continuing with {} contact(s): {e}", contacts.len());
                break;
            }
        }
    }

    debug!("Fetched {} contact(s) from directory", contacts.len());

    contacts
        .iter()
        .flat_map(|contact| records_for_contact(contact, config, current_year))
        .collect()
}

/// Records for a single contact: one per birthday and one per named
/// event, skipping any sub-entry whose date is missing month or day
/// (those cannot recur yearly and are silently unrepresentable here).
pub fn records_for_contact(
    contact: &Contact,
    config: &SyncConfig,
    current_year: i32,
) -> Vec<AnniversaryRecord> {
    let mut records = Vec::new();

    for birthday in &contact.birthdays {
        let Some(month_day) = birthday.month_day() else {
            continue;
        };

        records.push(AnniversaryRecord {
            identity_tag: contact.id.clone(),
            kind: AnniversaryKind::Birthday,
            display_name: contact.display_name.clone(),
            title: format!("{} {}", config.birthday_prefix, contact.display_name),
            month_day,
            birth_year: birthday.year,
            expected_description: compose_description(
                &config.templates,
                &contact.id,
                birthday.year,
                &contact.display_name,
                current_year,
            ),
        });
    }

    for event in &contact.events {
        let Some(month_day) = event.date.month_day() else {
            continue;
        };

        records.push(AnniversaryRecord {
            identity_tag: contact.id.clone(),
            kind: AnniversaryKind::NamedEvent(event.label.clone()),
            display_name: contact.display_name.clone(),
            title: format!("{}: {}", event.label, contact.display_name),
            month_day,
            // Age logic applies to birthdays only; a named event's year,
            // even when known, stays out of the description.
            birth_year: None,
            expected_description: compose_description(
                &config.templates,
                &contact.id,
                None,
                &contact.display_name,
                current_year,
            ),
        });
    }

    records
}
