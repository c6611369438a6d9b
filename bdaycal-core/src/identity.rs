//! Identity-tag extraction from free text.
//!
//! Calendar descriptions are the only channel the calendar service
//! offers for linking an event back to its contact, so the tag is
//! embedded in the description and recovered by pattern match. The
//! pattern is a contract: `people/c` followed by one or more digits,
//! anywhere in the text. Events whose description has no match are not
//! managed by this system and must never be touched.

use std::sync::LazyLock;

use regex::Regex;

static IDENTITY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"people/c[0-9]+").expect("identity tag pattern is valid"));

/// Extract the first identity tag from `text`, if any.
pub fn extract_identity_tag(text: &str) -> Option<&str> {
    IDENTITY_TAG.find(text).map(|m| m.as_str())
}
