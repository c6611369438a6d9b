//! Colored terminal rendering for sync actions.

use bdaycal_core::SyncAction;
use owo_colors::OwoColorize;

pub fn render_action(action: &SyncAction) -> String {
    match action {
        SyncAction::Create(record) => format!(
            "{} {} {}",
            "+".green(),
            record.title.green(),
            format!("({})", record.month_day).dimmed()
        ),
        SyncAction::Update { title, .. } => {
            format!("{} {}", "~".yellow(), title.yellow())
        }
        SyncAction::Delete { title, .. } => {
            format!("{} {}", "-".red(), title.red())
        }
    }
}
