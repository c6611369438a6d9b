//! Sync configuration.
//!
//! Everything that shapes titles and descriptions lives here rather than
//! in ambient constants: the reconciler detects changes by comparing
//! strings verbatim, so changing any of these values changes which
//! existing events are considered in sync.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BdayCalError, BdayCalResult};

fn default_birthday_prefix() -> String {
    "Geburtstag".to_string()
}

/// Configuration at ~/.config/bdaycal/config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Calendar that anniversary events are written to.
    pub calendar_id: String,

    /// Recipient of the plain-text sync report. No recipient, no report.
    #[serde(default)]
    pub report_recipient: Option<String>,

    /// Title prefix for birthday events ("<prefix> <name>").
    #[serde(default = "default_birthday_prefix")]
    pub birthday_prefix: String,

    #[serde(default)]
    pub templates: DescriptionTemplates,
}

/// Fragments of the generated event description.
///
/// The composed description doubles as the change-detection fingerprint
/// (see `reconcile`), so edits here will make every managed event look
/// out of date on the next run. That is expected: one round of updates
/// converges the calendar to the new wording.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DescriptionTemplates {
    pub contact_id_prefix: String,
    pub born_prefix: String,
    pub age_start: String,
    pub age_middle: String,
    pub age_end: String,
}

impl Default for DescriptionTemplates {
    fn default() -> Self {
        DescriptionTemplates {
            contact_id_prefix: "Kontakt-ID: ".to_string(),
            born_prefix: "\nGeboren: ".to_string(),
            age_start: "\nIn ".to_string(),
            age_middle: " wird ".to_string(),
            age_end: " Jahre alt.".to_string(),
        }
    }
}

impl SyncConfig {
    pub fn config_path() -> BdayCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BdayCalError::Config("Could not determine config directory".into()))?
            .join("bdaycal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> BdayCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> BdayCalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BdayCalError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents)
            .map_err(|e| BdayCalError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Report recipient, treating an empty string like an absent one.
    pub fn report_recipient(&self) -> Option<&str> {
        self.report_recipient
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_german_defaults() {
        let config: SyncConfig = toml::from_str(r#"calendar_id = "primary""#).unwrap();

        assert_eq!(config.calendar_id, "primary");
        assert_eq!(config.report_recipient, None);
        assert_eq!(config.birthday_prefix, "Geburtstag");
        assert_eq!(config.templates.contact_id_prefix, "Kontakt-ID: ");
        assert_eq!(config.templates.born_prefix, "\nGeboren: ");
    }

    #[test]
    fn test_empty_recipient_means_no_report() {
        let config: SyncConfig = toml::from_str(
            r#"
calendar_id = "primary"
report_recipient = "  "
"#,
        )
        .unwrap();

        assert_eq!(config.report_recipient(), None);
    }

    #[test]
    fn test_template_overrides() {
        let config: SyncConfig = toml::from_str(
            r#"
calendar_id = "primary"
birthday_prefix = "Birthday of"

[templates]
contact_id_prefix = "Contact: "
"#,
        )
        .unwrap();

        assert_eq!(config.birthday_prefix, "Birthday of");
        assert_eq!(config.templates.contact_id_prefix, "Contact: ");
        // Unset fragments keep their defaults
        assert_eq!(config.templates.age_end, " Jahre alt.");
    }
}
