//! Action execution against the calendar service.

use tracing::{info, warn};

use crate::calendar::{CalendarService, NewEvent};
use crate::reconcile::SyncAction;

/// Titles of the events each kind of action succeeded for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

impl SyncOutcome {
    pub fn has_changes(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty() || !self.deleted.is_empty()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.created.len(), self.updated.len(), self.deleted.len())
    }
}

/// Apply the action list. Actions are independent of each other, so a
/// failure drops only that action: it is logged, left out of the
/// outcome, and retried naturally on the next run. Nothing here aborts.
pub async fn apply_actions<C: CalendarService>(
    calendar: &C,
    calendar_id: &str,
    current_year: i32,
    actions: Vec<SyncAction>,
) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();

    for action in actions {
        match action {
            SyncAction::Create(record) => {
                let Some(start) = record.month_day.in_year(current_year) else {
                    warn!(
                        "Skipping '{}': {} does not exist in {current_year}",
                        record.title, record.month_day
                    );
                    continue;
                };

                let event = NewEvent {
                    title: record.title.clone(),
                    start,
                    description: record.expected_description,
                };

                match calendar.create_yearly_event(calendar_id, &event).await {
                    Ok(_) => {
                        info!("Created '{}'", record.title);
                        outcome.created.push(record.title);
                    }
                    Err(e) => warn!("Failed to create '{}': {e}", record.title),
                }
            }
            SyncAction::Update {
                event_id,
                title,
                description,
            } => match calendar.set_description(calendar_id, &event_id, &description).await {
                Ok(()) => {
                    info!("Updated '{title}'");
                    outcome.updated.push(title);
                }
                Err(e) => warn!("Failed to update '{title}': {e}"),
            },
            SyncAction::Delete { event_id, title } => {
                match calendar.delete_event(calendar_id, &event_id).await {
                    Ok(()) => {
                        info!("Deleted '{title}'");
                        outcome.deleted.push(title);
                    }
                    Err(e) => warn!("Failed to delete '{title}': {e}"),
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::RemoteEvent;
    use crate::error::{BdayCalError, BdayCalResult};
    use crate::record::{AnniversaryKind, AnniversaryRecord, MonthDay};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    enum Call {
        Create(NewEvent),
        SetDescription(String, String),
        Delete(String),
    }

    /// Calendar that records calls and fails for configured event ids.
    #[derive(Default)]
    struct RecordingCalendar {
        calls: Mutex<Vec<Call>>,
        fail_titles: Vec<String>,
        fail_ids: Vec<String>,
    }

    #[async_trait]
    impl CalendarService for RecordingCalendar {
        async fn list_events(
            &self,
            _calendar_id: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> BdayCalResult<Vec<RemoteEvent>> {
            Ok(Vec::new())
        }

        async fn create_yearly_event(
            &self,
            _calendar_id: &str,
            event: &NewEvent,
        ) -> BdayCalResult<String> {
            if self.fail_titles.contains(&event.title) {
                return Err(BdayCalError::Calendar("create failed".to_string()));
            }
            self.calls.lock().unwrap().push(Call::Create(event.clone()));
            Ok("new-id".to_string())
        }

        async fn set_description(
            &self,
            _calendar_id: &str,
            event_id: &str,
            description: &str,
        ) -> BdayCalResult<()> {
            if self.fail_ids.contains(&event_id.to_string()) {
                return Err(BdayCalError::Calendar("patch failed".to_string()));
            }
            self.calls.lock().unwrap().push(Call::SetDescription(
                event_id.to_string(),
                description.to_string(),
            ));
            Ok(())
        }

        async fn delete_event(&self, _calendar_id: &str, event_id: &str) -> BdayCalResult<()> {
            if self.fail_ids.contains(&event_id.to_string()) {
                return Err(BdayCalError::Calendar("delete failed".to_string()));
            }
            self.calls.lock().unwrap().push(Call::Delete(event_id.to_string()));
            Ok(())
        }
    }

    fn record(title: &str, month: u32, day: u32) -> AnniversaryRecord {
        AnniversaryRecord {
            identity_tag: "people/c1".to_string(),
            kind: AnniversaryKind::Birthday,
            display_name: title.to_string(),
            title: title.to_string(),
            month_day: MonthDay::new(month, day).unwrap(),
            birth_year: None,
            expected_description: "Kontakt-ID: people/c1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_in_current_year() {
        let calendar = RecordingCalendar::default();

        let outcome = apply_actions(
            &calendar,
            "primary",
            2025,
            vec![SyncAction::Create(record("Geburtstag A", 3, 15))],
        )
        .await;

        assert_eq!(outcome.created, vec!["Geburtstag A"]);
        let calls = calendar.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![Call::Create(NewEvent {
                title: "Geburtstag A".to_string(),
                start: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
                description: "Kontakt-ID: people/c1".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn test_leap_day_create_is_skipped_off_leap_years() {
        let calendar = RecordingCalendar::default();

        let outcome = apply_actions(
            &calendar,
            "primary",
            2025,
            vec![SyncAction::Create(record("Geburtstag Leap", 2, 29))],
        )
        .await;

        assert!(!outcome.has_changes());
        assert!(calendar.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_drop_the_action_and_continue() {
        let calendar = RecordingCalendar {
            fail_ids: vec!["bad-update".to_string()],
            ..Default::default()
        };

        let outcome = apply_actions(
            &calendar,
            "primary",
            2025,
            vec![
                SyncAction::Update {
                    event_id: "bad-update".to_string(),
                    title: "Geburtstag A".to_string(),
                    description: "text".to_string(),
                },
                SyncAction::Delete {
                    event_id: "ev2".to_string(),
                    title: "Geburtstag B".to_string(),
                },
            ],
        )
        .await;

        // The failed update is absent, the delete still ran
        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.deleted, vec!["Geburtstag B"]);
        assert_eq!(
            *calendar.calls.lock().unwrap(),
            vec![Call::Delete("ev2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_outcome_counts() {
        let calendar = RecordingCalendar::default();

        let outcome = apply_actions(
            &calendar,
            "primary",
            2025,
            vec![
                SyncAction::Create(record("Geburtstag A", 3, 15)),
                SyncAction::Update {
                    event_id: "ev1".to_string(),
                    title: "Geburtstag B".to_string(),
                    description: "text".to_string(),
                },
            ],
        )
        .await;

        assert_eq!(outcome.counts(), (1, 1, 0));
        assert!(outcome.has_changes());
    }
}
