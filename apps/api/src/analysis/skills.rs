//! Skill names and the gap calculation.
//!
//! Equality and presentation are separate concerns: `normalize` decides whether two
//! skill names are the same skill, `display` only shapes how a name is shown.

use std::collections::HashSet;

/// Equality form of a skill name: trimmed and lower-cased.
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Display form of a skill name: trimmed, first character upper-cased, rest unchanged.
pub fn display(skill: &str) -> String {
    let mut chars = skill.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the required skills the user does not have, in `required` order,
/// rendered in display form.
pub fn diff(required: &[String], have: &[String]) -> Vec<String> {
    let have: HashSet<String> = have.iter().map(|s| normalize(s)).collect();

    required
        .iter()
        .filter(|skill| !have.contains(&normalize(skill)))
        .map(|skill| display(skill))
        .collect()
}
