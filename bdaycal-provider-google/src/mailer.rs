//! Gmail report delivery.
//!
//! Gmail's send endpoint takes a base64url-encoded raw RFC 822 message;
//! the From header is filled in by Google from the authenticated user.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use bdaycal_core::{BdayCalError, BdayCalResult, ReportMailer};

use crate::session::Session;

const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

pub struct GmailMailer {
    session: Arc<Session>,
    http: reqwest::Client,
}

impl GmailMailer {
    pub fn new(session: Arc<Session>) -> Self {
        GmailMailer {
            session,
            http: reqwest::Client::new(),
        }
    }
}

fn raw_message(recipient: &str, subject: &str, body: &str) -> String {
    let message = format!(
        "To: {recipient}\r\n\
         Subject: {subject}\r\n\
         Content-Type: text/plain; charset=\"UTF-8\"\r\n\
         \r\n\
         {body}"
    );

    URL_SAFE_NO_PAD.encode(message.as_bytes())
}

#[async_trait]
impl ReportMailer for GmailMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> BdayCalResult<()> {
        let token = self.session.access_token().await?;

        let response = self
            .http
            .post(SEND_URL)
            .bearer_auth(token)
            .json(&serde_json::json!({ "raw": raw_message(recipient, subject, body) }))
            .send()
            .await
            .map_err(|e| BdayCalError::Mail(format!("Send request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BdayCalError::Mail(format!(
                "Gmail send returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
