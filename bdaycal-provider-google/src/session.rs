//! Google OAuth session handling.
//!
//! Token material lives at ~/.config/bdaycal/google/session.toml:
//! client id/secret, a long-lived refresh token and the most recent
//! access token with its expiry. Obtaining the initial refresh token is
//! out of scope here; this module only keeps an existing session fresh.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use bdaycal_core::{BdayCalError, BdayCalResult};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh slightly before the reported expiry so an in-flight request
/// doesn't race the deadline.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "expired")]
    pub expires_at: DateTime<Utc>,
}

fn expired() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

pub struct Session {
    path: PathBuf,
    http: reqwest::Client,
    data: Mutex<SessionData>,
}

pub fn base_dir() -> BdayCalResult<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| BdayCalError::Session("Could not determine config directory".into()))?
        .join("bdaycal")
        .join("google"))
}

impl Session {
    pub fn load() -> BdayCalResult<Self> {
        Self::load_from(base_dir()?.join("session.toml"))
    }

    pub fn load_from(path: PathBuf) -> BdayCalResult<Self> {
        if !path.exists() {
            return Err(BdayCalError::Session(format!(
                "Google OAuth session not found.\n\n\
                Create {} with:\n\n\
                client_id = \"your-client-id.apps.googleusercontent.com\"\n\
                client_secret = \"your-client-secret\"\n\
                refresh_token = \"your-refresh-token\"",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            BdayCalError::Session(format!("Failed to read session from {}: {}", path.display(), e))
        })?;

        let data: SessionData = toml::from_str(&contents).map_err(|e| {
            BdayCalError::Session(format!("Failed to parse session at {}: {}", path.display(), e))
        })?;

        Ok(Session {
            path,
            http: reqwest::Client::new(),
            data: Mutex::new(data),
        })
    }

    /// A currently valid access token, refreshing it first if the
    /// cached one is (about to be) expired.
    pub async fn access_token(&self) -> BdayCalResult<String> {
        let mut data = self.data.lock().await;

        if Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) < data.expires_at {
            return Ok(data.access_token.clone());
        }

        debug!("Access token expired, refreshing");

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", data.client_id.as_str()),
                ("client_secret", data.client_secret.as_str()),
                ("refresh_token", data.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| BdayCalError::Session(format!("Token refresh request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BdayCalError::Session(format!(
                "Token refresh returned {}",
                response.status()
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| BdayCalError::Session(format!("Failed to parse token response: {e}")))?;

        data.access_token = tokens.access_token;
        data.expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

        self.save(&data)?;

        Ok(data.access_token.clone())
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Session {
            path: std::path::PathBuf::from("/dev/null"),
            http: reqwest::Client::new(),
            data: Mutex::new(SessionData {
                client_id: String::new(),
                client_secret: String::new(),
                refresh_token: String::new(),
                access_token: "test-token".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            }),
        }
    }

    fn save(&self, data: &SessionData) -> BdayCalResult<()> {
        let contents = toml::to_string_pretty(data)
            .map_err(|e| BdayCalError::Session(format!("Failed to serialize session: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        // Owner-only: the file holds OAuth tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}
