//! Reconciliation between anniversary records and calendar records.
//!
//! Matching key: the exact `(identity_tag, title)` string pair. Within
//! a key bucket, two records describe the same anniversary iff their
//! month and day are equal (the year is ignored on both sides).
//!
//! Titles are part of the key as literal strings, so a change to
//! title-formatting rules between runs makes every existing event look
//! orphaned: the next run creates the new titles and deletes the old
//! ones. Accepted behavior, not a bug.

use std::collections::HashMap;
use std::fmt;

use crate::record::{AnniversaryRecord, CalendarRecord};

/// One calendar mutation decided by the reconciler.
///
/// Update and Delete carry the event title alongside the opaque handle
/// so the executor can report what it touched.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    Create(AnniversaryRecord),
    Update {
        event_id: String,
        title: String,
        description: String,
    },
    Delete {
        event_id: String,
        title: String,
    },
}

impl SyncAction {
    pub fn title(&self) -> &str {
        match self {
            SyncAction::Create(record) => &record.title,
            SyncAction::Update { title, .. } => title,
            SyncAction::Delete { title, .. } => title,
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Create(_) => write!(f, "create: {}", self.title()),
            SyncAction::Update { .. } => write!(f, "update: {}", self.title()),
            SyncAction::Delete { .. } => write!(f, "delete: {}", self.title()),
        }
    }
}

/// Matching key: identity tag plus literal title.
type Key<'a> = (&'a str, &'a str);

/// Compute the action list that makes the calendar mirror the contacts.
///
/// Two passes over the two record sets:
///
/// 1. For every anniversary record, the first calendar record sharing
///    its key and month/day: none ⇒ Create; found but with a different
///    description ⇒ Update to the expected text; found and identical ⇒
///    already in sync, nothing.
/// 2. For every calendar record with no key-and-date match among the
///    anniversary records ⇒ Delete.
///
/// The passes walk the same pairing relation in opposite directions, so
/// a calendar event appears in at most one emitted action per run.
///
/// Duplicates sharing key and date are broken by iteration order (first
/// match wins); that order is only as stable as the caller's input
/// order. Documented nondeterminism.
pub fn reconcile(
    anniversaries: &[AnniversaryRecord],
    calendar: &[CalendarRecord],
) -> Vec<SyncAction> {
    let mut existing: HashMap<Key, Vec<&CalendarRecord>> = HashMap::new();
    for record in calendar {
        existing
            .entry((record.identity_tag.as_str(), record.title.as_str()))
            .or_default()
            .push(record);
    }

    let mut wanted: HashMap<Key, Vec<&AnniversaryRecord>> = HashMap::new();
    for record in anniversaries {
        wanted
            .entry((record.identity_tag.as_str(), record.title.as_str()))
            .or_default()
            .push(record);
    }

    let mut actions = Vec::new();

    for anniversary in anniversaries {
        let matched = existing
            .get(&(anniversary.identity_tag.as_str(), anniversary.title.as_str()))
            .and_then(|bucket| {
                bucket
                    .iter()
                    .find(|event| event.month_day == anniversary.month_day)
            });

        match matched {
            None => actions.push(SyncAction::Create(anniversary.clone())),
            Some(event) => {
                // Byte-for-byte comparison: any whitespace or wording
                // difference counts as out of sync.
                if event.description != anniversary.expected_description {
                    actions.push(SyncAction::Update {
                        event_id: event.event_id.clone(),
                        title: event.title.clone(),
                        description: anniversary.expected_description.clone(),
                    });
                }
            }
        }
    }

    for event in calendar {
        let still_wanted = wanted
            .get(&(event.identity_tag.as_str(), event.title.as_str()))
            .is_some_and(|bucket| {
                bucket
                    .iter()
                    .any(|anniversary| anniversary.month_day == event.month_day)
            });

        if !still_wanted {
            actions.push(SyncAction::Delete {
                event_id: event.event_id.clone(),
                title: event.title.clone(),
            });
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AnniversaryKind, MonthDay};

    fn anniversary(tag: &str, title: &str, month: u32, day: u32) -> AnniversaryRecord {
        AnniversaryRecord {
            identity_tag: tag.to_string(),
            kind: AnniversaryKind::Birthday,
            display_name: title.to_string(),
            title: title.to_string(),
            month_day: MonthDay::new(month, day).unwrap(),
            birth_year: None,
            expected_description: format!("Kontakt-ID: {tag}"),
        }
    }

    fn calendar_event(
        id: &str,
        tag: &str,
        title: &str,
        month: u32,
        day: u32,
        description: &str,
    ) -> CalendarRecord {
        CalendarRecord {
            event_id: id.to_string(),
            identity_tag: tag.to_string(),
            title: title.to_string(),
            month_day: MonthDay::new(month, day).unwrap(),
            description: description.to_string(),
        }
    }

    fn jane(current_year: i32) -> AnniversaryRecord {
        let age = current_year - 1990;
        AnniversaryRecord {
            identity_tag: "people/c123".to_string(),
            kind: AnniversaryKind::Birthday,
            display_name: "Jane Doe".to_string(),
            title: "Geburtstag Jane Doe".to_string(),
            month_day: MonthDay::new(3, 15).unwrap(),
            birth_year: Some(1990),
            expected_description: format!(
                "Kontakt-ID: people/c123\nGeboren: 1990\nIn {current_year} wird Jane Doe {age} Jahre alt."
            ),
        }
    }

    #[test]
    fn test_missing_event_is_created() {
        let actions = reconcile(&[jane(2025)], &[]);

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            SyncAction::Create(record) => {
                assert_eq!(record.title, "Geburtstag Jane Doe");
                assert_eq!(
                    record.expected_description,
                    "Kontakt-ID: people/c123\nGeboren: 1990\nIn 2025 wird Jane Doe 35 Jahre alt."
                );
            }
            other => panic!("Expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_age_is_updated_not_recreated() {
        let existing = calendar_event(
            "ev1",
            "people/c123",
            "Geburtstag Jane Doe",
            3,
            15,
            "Kontakt-ID: people/c123\nGeboren: 1990\nIn 2024 wird Jane Doe 34 Jahre alt.",
        );

        let actions = reconcile(&[jane(2025)], &[existing]);

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            SyncAction::Update {
                event_id,
                description,
                ..
            } => {
                assert_eq!(event_id, "ev1");
                assert_eq!(
                    description,
                    "Kontakt-ID: people/c123\nGeboren: 1990\nIn 2025 wird Jane Doe 35 Jahre alt."
                );
            }
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_description_emits_nothing() {
        let existing = calendar_event(
            "ev1",
            "people/c123",
            "Geburtstag Jane Doe",
            3,
            15,
            "Kontakt-ID: people/c123\nGeboren: 1990\nIn 2025 wird Jane Doe 35 Jahre alt.",
        );

        assert!(reconcile(&[jane(2025)], &[existing]).is_empty());
    }

    #[test]
    fn test_orphaned_event_is_deleted() {
        let orphan = calendar_event(
            "ev9",
            "people/c999",
            "Geburtstag Unknown",
            5,
            5,
            "Kontakt-ID: people/c999",
        );

        let actions = reconcile(&[], &[orphan]);

        assert_eq!(
            actions,
            vec![SyncAction::Delete {
                event_id: "ev9".to_string(),
                title: "Geburtstag Unknown".to_string(),
            }]
        );
    }

    #[test]
    fn test_same_key_different_date_never_matches() {
        // Same contact and title, but the stored event sits on the
        // wrong day: the pair must not match in either direction.
        let a = anniversary("people/c1", "Geburtstag A", 3, 15);
        let c = calendar_event("ev1", "people/c1", "Geburtstag A", 3, 16, "Kontakt-ID: people/c1");

        let actions = reconcile(&[a], &[c]);

        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], SyncAction::Create(_)));
        assert!(matches!(actions[1], SyncAction::Delete { .. }));
    }

    #[test]
    fn test_title_change_causes_create_and_delete() {
        let a = anniversary("people/c1", "Birthday A", 3, 15);
        let c = calendar_event("ev1", "people/c1", "Geburtstag A", 3, 15, "Kontakt-ID: people/c1");

        let actions = reconcile(&[a], &[c]);

        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], SyncAction::Create(r) if r.title == "Birthday A"));
        assert!(
            matches!(&actions[1], SyncAction::Delete { title, .. } if title == "Geburtstag A")
        );
    }

    #[test]
    fn test_at_most_one_action_per_calendar_event() {
        let a1 = anniversary("people/c1", "Geburtstag A", 3, 15);
        let a2 = anniversary("people/c2", "Geburtstag B", 4, 1);
        let in_sync = calendar_event("ev1", "people/c1", "Geburtstag A", 3, 15, "Kontakt-ID: people/c1");
        let stale = calendar_event("ev2", "people/c2", "Geburtstag B", 4, 1, "old text");
        let orphan = calendar_event("ev3", "people/c3", "Geburtstag C", 5, 5, "Kontakt-ID: people/c3");

        let actions = reconcile(&[a1, a2], &[in_sync, stale, orphan]);

        let mut touched: Vec<&str> = actions
            .iter()
            .filter_map(|a| match a {
                SyncAction::Update { event_id, .. } | SyncAction::Delete { event_id, .. } => {
                    Some(event_id.as_str())
                }
                SyncAction::Create(_) => None,
            })
            .collect();
        let before = touched.len();
        touched.sort();
        touched.dedup();
        assert_eq!(before, touched.len(), "an event was targeted twice");
        assert_eq!(touched, vec!["ev2", "ev3"]);
    }

    #[test]
    fn test_duplicate_events_first_match_wins() {
        let a = anniversary("people/c1", "Geburtstag A", 3, 15);
        let first = calendar_event("ev1", "people/c1", "Geburtstag A", 3, 15, "stale");
        let second = calendar_event("ev2", "people/c1", "Geburtstag A", 3, 15, "stale too");

        let actions = reconcile(&[a], &[first, second]);

        // Only the first duplicate is updated; neither is deleted, since
        // both date-match a wanted anniversary.
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], SyncAction::Update { event_id, .. } if event_id == "ev1"));
    }

    #[test]
    fn test_converged_state_is_a_fixpoint() {
        // Simulate applying the first run's actions, then reconcile again.
        let records = vec![jane(2025), anniversary("people/c2", "Geburtstag B", 4, 1)];

        let first_run = reconcile(&records, &[]);
        assert_eq!(first_run.len(), 2);

        let applied: Vec<CalendarRecord> = first_run
            .iter()
            .enumerate()
            .map(|(i, action)| match action {
                SyncAction::Create(r) => CalendarRecord {
                    event_id: format!("ev{i}"),
                    identity_tag: r.identity_tag.clone(),
                    title: r.title.clone(),
                    month_day: r.month_day,
                    description: r.expected_description.clone(),
                },
                other => panic!("Expected only creates on an empty calendar, got {other:?}"),
            })
            .collect();

        assert!(reconcile(&records, &applied).is_empty());
    }

    #[test]
    fn test_year_rollover_emits_exactly_one_update() {
        // Calendar converged for 2025; a year passes with no input change.
        let converged = calendar_event(
            "ev1",
            "people/c123",
            "Geburtstag Jane Doe",
            3,
            15,
            "Kontakt-ID: people/c123\nGeboren: 1990\nIn 2025 wird Jane Doe 35 Jahre alt.",
        );

        let actions = reconcile(&[jane(2026)], &[converged]);

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            SyncAction::Update { description, .. } => {
                assert!(description.contains("In 2026 wird Jane Doe 36 Jahre alt."));
            }
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_inputs_do_nothing() {
        assert!(reconcile(&[], &[]).is_empty());
    }
}
