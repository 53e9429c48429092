//! Volunteer roster: comma separated, one volunteer per row.
//!
//! Columns are name, manual-check flag (`yes` or anything else), club, then any
//! number of qualification labels. Labels other than `head referee`,
//! `assistant referee` and `snitch referee` are ignored.

use crate::domain::model::{
    Qualification, QualificationRecord, QualificationSet, VolunteerRecord, NON_PLAYING_CLUB,
};
use crate::domain::ports::VolunteerOrder;
use crate::domain::services::normalize::{club_then_name_key, fix, volunteer_key};
use crate::utils::error::Result;

fn parse_row(row: &csv::StringRecord) -> Option<VolunteerRecord> {
    let name = fix(row.get(0).unwrap_or_default());
    if name.is_empty() {
        tracing::warn!("Skipping roster row without a name: {:?}", row);
        return None;
    }

    let manually_verified = fix(row.get(1).unwrap_or_default()) == "YES";

    let club = match fix(row.get(2).unwrap_or_default()) {
        club if club.is_empty() => NON_PLAYING_CLUB.to_string(),
        club => club,
    };

    let claims: QualificationSet = row
        .iter()
        .skip(3)
        .filter_map(|label| Qualification::from_label(&fix(label)))
        .collect();

    if claims.is_empty() {
        tracing::debug!("Dropping {}: no recognised qualifications", name);
        return None;
    }

    let volunteer = VolunteerRecord::new(
        QualificationRecord::new(name, club, claims),
        manually_verified,
    );
    tracing::debug!("Got volunteer: {}", volunteer);
    Some(volunteer)
}

/// Reads roster rows in file order. With `has_header` the first row is skipped.
/// Quotes are ordinary characters, removed later by [`fix`].
pub fn parse_roster(data: &[u8], has_header: bool) -> Result<Vec<VolunteerRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut volunteers = Vec::new();
    for row in reader.records() {
        if let Some(volunteer) = parse_row(&row?) {
            volunteers.push(volunteer);
        }
    }
    Ok(volunteers)
}

pub fn sort_volunteers(volunteers: &mut [VolunteerRecord], order: VolunteerOrder) {
    match order {
        VolunteerOrder::ClubThenName => volunteers.sort_by_cached_key(club_then_name_key),
        VolunteerOrder::Name => volunteers.sort_by_cached_key(volunteer_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster_row() {
        let data = b"Jane Doe,No,Sheffield Squids,head referee, Snitch Referee ,scorekeeper\n";

        let volunteers = parse_roster(data, false).unwrap();

        assert_eq!(volunteers.len(), 1);
        let jane = &volunteers[0];
        assert_eq!(jane.record.name(), "JANE DOE");
        assert_eq!(jane.record.club(), "SHEFFIELD SQUIDS");
        assert!(!jane.manually_verified);
        assert!(jane.record.holds(Qualification::HeadReferee));
        assert!(!jane.record.holds(Qualification::AssistantReferee));
        assert!(jane.record.holds(Qualification::SnitchReferee));
    }

    #[test]
    fn test_first_line_is_data_without_header() {
        let data = b"Jane Doe,yes,,assistant referee\nBob Smith,no,Squids,head referee\n";

        let volunteers = parse_roster(data, false).unwrap();
        assert_eq!(volunteers.len(), 2);
        assert!(volunteers[0].manually_verified);
        assert_eq!(volunteers[0].record.club(), NON_PLAYING_CLUB);

        let volunteers = parse_roster(data, true).unwrap();
        assert_eq!(volunteers.len(), 1);
        assert_eq!(volunteers[0].record.name(), "BOB SMITH");
    }

    #[test]
    fn test_stray_quotes_do_not_swallow_rows() {
        let data = b"\"Jane Doe,No,Sheffield Squids,head referee\n\
Bob Smith,No,Sheffield Squids,\"assistant referee\"\n\
Carol White,No,Leeds,snitch referee\"\n";

        let volunteers = parse_roster(data, false).unwrap();
        let names: Vec<&str> = volunteers.iter().map(|v| v.record.name()).collect();

        assert_eq!(names, vec!["JANE DOE", "BOB SMITH", "CAROL WHITE"]);
        assert!(volunteers[1].record.holds(Qualification::AssistantReferee));
        assert!(volunteers[2].record.holds(Qualification::SnitchReferee));
    }

    #[test]
    fn test_rows_without_qualifications_are_dropped() {
        let data = b"Jane Doe,No,Squids,scorekeeper\n\
Short Row\n\
Two,Cols\n\
,No,Squids,head referee\n";

        assert!(parse_roster(data, false).unwrap().is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let data = b"Zed,No,Alpha,head referee\n\
Amy,No,Beta,head referee\n\
Ben,No,Alpha,head referee\n";
        let mut volunteers = parse_roster(data, false).unwrap();

        sort_volunteers(&mut volunteers, VolunteerOrder::ClubThenName);
        let names: Vec<&str> = volunteers.iter().map(|v| v.record.name()).collect();
        assert_eq!(names, vec!["BEN", "ZED", "AMY"]);

        sort_volunteers(&mut volunteers, VolunteerOrder::Name);
        let names: Vec<&str> = volunteers.iter().map(|v| v.record.name()).collect();
        assert_eq!(names, vec!["AMY", "BEN", "ZED"]);
    }
}
