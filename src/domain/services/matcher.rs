use crate::domain::model::{RefereeRecord, VolunteerRecord};
use crate::domain::services::normalize::{referee_key, volunteer_key};
use std::cmp::Ordering;

/// Looks up the registry entry for `volunteer` in `sorted_referees`, which must
/// already be sorted ascending by name key.
///
/// Binary search over a shrinking window `[lo, hi)`. A smaller key narrows the
/// window to `[lo, mid)`, a larger key to `[mid, hi)`: the midpoint stays in the
/// right half. Each step with more than one entry strictly shrinks the window.
pub fn find_match<'a>(
    sorted_referees: &'a [RefereeRecord],
    volunteer: &VolunteerRecord,
) -> Option<&'a RefereeRecord> {
    let wanted = volunteer_key(volunteer);
    let mut lo = 0;
    let mut hi = sorted_referees.len();

    loop {
        let len = hi - lo;
        if len == 0 {
            return None;
        }

        let mid = lo + len / 2;
        let candidate = &sorted_referees[mid];

        match wanted.as_str().cmp(referee_key(candidate).as_str()) {
            Ordering::Equal => return Some(candidate),
            Ordering::Less if len > 1 => hi = mid,
            Ordering::Greater if len > 1 => lo = mid,
            _ => return None,
        }
    }
}
