//! Name canonicalization shared by the roster and the registry.
//!
//! Both sides must go through the same functions, otherwise keys never collide
//! and every volunteer is reported as missing.

use crate::domain::model::{RefereeRecord, VolunteerRecord};

/// Display form: surrounding whitespace trimmed, `"` removed, upper case.
pub fn fix(value: &str) -> String {
    value.trim().replace('"', "").to_uppercase()
}

/// Ordering and equality key: [`fix`] with every whitespace character removed,
/// so `Jo Smith` and `JoSmith` compare equal.
pub fn name_key(name: &str) -> String {
    fix(name).chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn referee_key(referee: &RefereeRecord) -> String {
    name_key(referee.record.name())
}

pub fn volunteer_key(volunteer: &VolunteerRecord) -> String {
    name_key(volunteer.record.name())
}

/// Key used to group the report by club, then by name.
pub fn club_then_name_key(volunteer: &VolunteerRecord) -> String {
    let combined = format!("{}{}", volunteer.record.club(), volunteer.record.name());
    name_key(&combined)
}
