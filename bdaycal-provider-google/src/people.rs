//! Google People API directory.

use std::sync::Arc;

use async_trait::async_trait;

use bdaycal_core::{BdayCalError, BdayCalResult, ContactPage, DirectoryService};

use crate::session::Session;
use crate::types::ConnectionsResponse;

const CONNECTIONS_URL: &str = "https://people.googleapis.com/v1/people/me/connections";
const PAGE_SIZE: &str = "200";

pub struct GoogleDirectory {
    session: Arc<Session>,
    http: reqwest::Client,
}

impl GoogleDirectory {
    pub fn new(session: Arc<Session>) -> Self {
        GoogleDirectory {
            session,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DirectoryService for GoogleDirectory {
    async fn list_contacts(&self, page_token: Option<&str>) -> BdayCalResult<ContactPage> {
        let token = self.session.access_token().await?;

        let mut query = vec![
            ("personFields", "names,birthdays,events"),
            ("pageSize", PAGE_SIZE),
        ];
        if let Some(page_token) = page_token {
            query.push(("pageToken", page_token));
        }

        let response = self
            .http
            .get(CONNECTIONS_URL)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| BdayCalError::Directory(format!("Connections request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BdayCalError::Directory(format!(
                "People API returned {}",
                response.status()
            )));
        }

        let page: ConnectionsResponse = response
            .json()
            .await
            .map_err(|e| BdayCalError::Directory(format!("Failed to parse connections: {e}")))?;

        Ok(ContactPage {
            contacts: page
                .connections
                .into_iter()
                .map(|person| person.into_contact())
                .collect(),
            next_page_token: page.next_page_token,
        })
    }
}
