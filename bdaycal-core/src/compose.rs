//! Description composition.
//!
//! The composed text is the format contract the reconciler relies on:
//! descriptions are compared byte-for-byte, so the concatenation order
//! and every embedded newline are load-bearing. The age line is
//! recomputed from the real current year on every run, which is what
//! keeps "turns N years old" current — last year's text simply stops
//! matching and gets updated.

use crate::config::DescriptionTemplates;

/// Compose the canonical event description for one anniversary.
///
/// Without a birth year the description is just the identity-tag line.
/// With one, the born line and the age line are appended, where
/// `age = current_year - birth_year`.
pub fn compose_description(
    templates: &DescriptionTemplates,
    identity_tag: &str,
    birth_year: Option<i32>,
    display_name: &str,
    current_year: i32,
) -> String {
    let mut text = format!("{}{}", templates.contact_id_prefix, identity_tag);

    if let Some(birth_year) = birth_year {
        let age = current_year - birth_year;
        text.push_str(&format!("{}{}", templates.born_prefix, birth_year));
        text.push_str(&format!(
            "{}{}{}{} {}{}",
            templates.age_start,
            current_year,
            templates.age_middle,
            display_name,
            age,
            templates.age_end
        ));
    }

    text
}
