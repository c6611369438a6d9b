//! Plain-text sync report.

use async_trait::async_trait;
use tracing::warn;

use crate::apply::SyncOutcome;
use crate::error::BdayCalResult;

pub const REPORT_SUBJECT: &str = "Geburtstagskalender-Sync";

/// Something that can deliver the report (in practice: email).
#[async_trait]
pub trait ReportMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> BdayCalResult<()>;
}

fn section(heading: &str, titles: &[String]) -> String {
    let body = if titles.is_empty() {
        "(none)".to_string()
    } else {
        let mut titles = titles.to_vec();
        titles.sort();
        titles.join("\n")
    };

    format!("{heading}:\n{body}")
}

/// Render the three-section report: created, updated, deleted, each a
/// sorted newline-joined list of titles or a "(none)" placeholder.
pub fn render_report(outcome: &SyncOutcome) -> String {
    [
        section("Created", &outcome.created),
        section("Updated", &outcome.updated),
        section("Deleted", &outcome.deleted),
    ]
    .join("\n\n")
}

/// Send the report, returning whether delivery succeeded. A failure is
/// logged and must never affect calendar state, but callers can still
/// tell the user the report did not go out.
pub async fn send_report<M: ReportMailer>(
    mailer: &M,
    recipient: &str,
    outcome: &SyncOutcome,
) -> bool {
    match mailer.send(recipient, REPORT_SUBJECT, &render_report(outcome)).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send report to {recipient}: {e}");
            false
        }
    }
}
