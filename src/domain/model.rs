use serde::{Deserialize, Serialize};
use std::fmt;

/// Club recorded for registry entries, which carry no team.
pub const REGISTRY_CLUB: &str = "N/A";

/// Club recorded for volunteers who left the club column blank.
pub const NON_PLAYING_CLUB: &str = "Non-playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualification {
    HeadReferee,
    AssistantReferee,
    SnitchReferee,
}

impl Qualification {
    pub const ALL: [Qualification; 3] = [
        Qualification::HeadReferee,
        Qualification::AssistantReferee,
        Qualification::SnitchReferee,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Qualification::HeadReferee => "HR",
            Qualification::AssistantReferee => "AR",
            Qualification::SnitchReferee => "SR",
        }
    }

    /// Label used in roster columns, lower case.
    pub fn label(self) -> &'static str {
        match self {
            Qualification::HeadReferee => "head referee",
            Qualification::AssistantReferee => "assistant referee",
            Qualification::SnitchReferee => "snitch referee",
        }
    }

    /// Matches an already normalized (upper-case) roster label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "HEAD REFEREE" => Some(Qualification::HeadReferee),
            "ASSISTANT REFEREE" => Some(Qualification::AssistantReferee),
            "SNITCH REFEREE" => Some(Qualification::SnitchReferee),
            _ => None,
        }
    }

    /// Registry certification ids: 1 snitch, 2 assistant, 3 head.
    pub fn from_certification_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Qualification::SnitchReferee),
            2 => Some(Qualification::AssistantReferee),
            3 => Some(Qualification::HeadReferee),
            _ => None,
        }
    }

    /// Line written to the problem log when this qualification is not confirmed.
    pub fn missing_line(self) -> &'static str {
        match self {
            Qualification::HeadReferee => "HR missing.",
            Qualification::AssistantReferee => "AR missing.",
            Qualification::SnitchReferee => "SR missing",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationSet {
    pub head_referee: bool,
    pub assistant_referee: bool,
    pub snitch_referee: bool,
}

impl QualificationSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, qualification: Qualification) -> Self {
        match qualification {
            Qualification::HeadReferee => self.head_referee = true,
            Qualification::AssistantReferee => self.assistant_referee = true,
            Qualification::SnitchReferee => self.snitch_referee = true,
        }
        self
    }

    pub fn holds(&self, qualification: Qualification) -> bool {
        match qualification {
            Qualification::HeadReferee => self.head_referee,
            Qualification::AssistantReferee => self.assistant_referee,
            Qualification::SnitchReferee => self.snitch_referee,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.head_referee || self.assistant_referee || self.snitch_referee)
    }

    pub fn iter(&self) -> impl Iterator<Item = Qualification> + '_ {
        Qualification::ALL
            .into_iter()
            .filter(move |q| self.holds(*q))
    }
}

impl FromIterator<Qualification> for QualificationSet {
    fn from_iter<I: IntoIterator<Item = Qualification>>(quals: I) -> Self {
        quals.into_iter().fold(Self::none(), |set, q| set.with(q))
    }
}

/// Certifications held or claimed by one person, whichever side they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationRecord {
    name: String,
    club: String,
    qualifications: QualificationSet,
}

impl QualificationRecord {
    pub fn new(name: String, club: String, qualifications: QualificationSet) -> Self {
        Self {
            name,
            club,
            qualifications,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn club(&self) -> &str {
        &self.club
    }

    pub fn qualifications(&self) -> QualificationSet {
        self.qualifications
    }

    pub fn holds(&self, qualification: Qualification) -> bool {
        self.qualifications.holds(qualification)
    }

    /// `NAME (CLUB)`
    pub fn short_name(&self) -> String {
        format!("{} ({})", self.name, self.club)
    }

    /// Held qualifications as `HR AR SR`, absent ones omitted.
    pub fn qualification_summary(&self) -> String {
        self.qualifications
            .iter()
            .map(Qualification::abbreviation)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_csv(&self) -> String {
        let mut fields = vec![self.name.clone(), self.club.clone()];
        fields.extend(self.qualifications.iter().map(|q| q.label().to_string()));
        fields.join(",")
    }
}

impl fmt::Display for QualificationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.qualification_summary();
        if summary.is_empty() {
            write!(f, "{}", self.short_name())
        } else {
            write!(f, "{} {}", self.short_name(), summary)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerRecord {
    pub record: QualificationRecord,
    pub manually_verified: bool,
}

impl VolunteerRecord {
    pub fn new(record: QualificationRecord, manually_verified: bool) -> Self {
        Self {
            record,
            manually_verified,
        }
    }
}

impl fmt::Display for VolunteerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeRecord {
    pub record: QualificationRecord,
}

impl RefereeRecord {
    pub fn new(name: String, qualifications: QualificationSet) -> Self {
        Self {
            record: QualificationRecord::new(name, REGISTRY_CLUB.to_string(), qualifications),
        }
    }
}

impl fmt::Display for RefereeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}

/// One decoded registry page. `raw_len` counts every record the page held,
/// including ones dropped as malformed; only `raw_len == 0` ends pagination.
#[derive(Debug, Clone, Default)]
pub struct RegistryPage {
    pub referees: Vec<RefereeRecord>,
    pub raw_len: usize,
}

impl RegistryPage {
    pub fn is_last(&self) -> bool {
        self.raw_len == 0
    }
}

/// Registry entries sorted by name key, plus whether every page was read.
#[derive(Debug, Clone, Default)]
pub struct RefereeDirectory {
    pub referees: Vec<RefereeRecord>,
    pub pages_read: u32,
    /// Set when pagination stopped on a failed fetch instead of an empty page.
    pub truncated_by: Option<String>,
}

impl RefereeDirectory {
    pub fn is_complete(&self) -> bool {
        self.truncated_by.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualificationStatus {
    Yes,
    No,
    Unqualified,
}

impl QualificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QualificationStatus::Yes => "Yes",
            QualificationStatus::No => "No",
            QualificationStatus::Unqualified => "UNQUALIFIED",
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final column of the qualification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryStatus {
    Found,
    NotFound,
    CheckedManually,
}

impl RegistryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistryStatus::Found => "Yes",
            RegistryStatus::NotFound => "NO",
            RegistryStatus::CheckedManually => "Checked manually",
        }
    }
}

impl fmt::Display for RegistryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub club: String,
    pub head_referee: QualificationStatus,
    pub assistant_referee: QualificationStatus,
    pub snitch_referee: QualificationStatus,
    pub registry: RegistryStatus,
}

impl ReportRow {
    pub const HEADER: [&'static str; 6] = ["Name", "Club", "HR", "AR", "SR", "IQA Database"];

    pub fn status(&self, qualification: Qualification) -> QualificationStatus {
        match qualification {
            Qualification::HeadReferee => self.head_referee,
            Qualification::AssistantReferee => self.assistant_referee,
            Qualification::SnitchReferee => self.snitch_referee,
        }
    }

    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.club.as_str(),
            self.head_referee.as_str(),
            self.assistant_referee.as_str(),
            self.snitch_referee.as_str(),
            self.registry.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemKind {
    NotQualified,
    NotFound,
}

impl ProblemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::NotQualified => "NOT QUALIFIED",
            ProblemKind::NotFound => "NOT FOUND",
        }
    }
}

/// A volunteer claiming certifications the registry does not confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Display form of the volunteer, `NAME (CLUB) HR AR SR`.
    pub volunteer: String,
    pub kind: ProblemKind,
    pub missing: Vec<Qualification>,
}

impl Problem {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}: {}:", self.volunteer, self.kind.as_str())];
        lines.extend(self.missing.iter().map(|q| format!("\t{}", q.missing_line())));
        lines
    }
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub row: ReportRow,
    pub problem: Option<Problem>,
}

#[derive(Debug, Clone, Default)]
pub struct QualificationReport {
    pub rows: Vec<ReportRow>,
    pub problems: Vec<Problem>,
    /// Why the registry may be missing entries, if it is.
    pub directory_warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> QualificationRecord {
        QualificationRecord::new(
            "JANE DOE".to_string(),
            "SHEFFIELD SQUIDS".to_string(),
            QualificationSet::from_iter([
                Qualification::HeadReferee,
                Qualification::SnitchReferee,
            ]),
        )
    }

    #[test]
    fn test_display_lists_held_qualifications() {
        assert_eq!(jane().to_string(), "JANE DOE (SHEFFIELD SQUIDS) HR SR");
        assert_eq!(
            jane().to_csv(),
            "JANE DOE,SHEFFIELD SQUIDS,head referee,snitch referee"
        );
    }

    #[test]
    fn test_referee_gets_registry_club() {
        let referee = RefereeRecord::new("JANE DOE".to_string(), QualificationSet::none());
        assert_eq!(referee.record.club(), REGISTRY_CLUB);
        assert_eq!(referee.to_string(), "JANE DOE (N/A)");
    }

    #[test]
    fn test_certification_ids() {
        assert_eq!(
            Qualification::from_certification_id(3),
            Some(Qualification::HeadReferee)
        );
        assert_eq!(
            Qualification::from_certification_id(2),
            Some(Qualification::AssistantReferee)
        );
        assert_eq!(
            Qualification::from_certification_id(1),
            Some(Qualification::SnitchReferee)
        );
        assert_eq!(Qualification::from_certification_id(4), None);
    }

    #[test]
    fn test_problem_lines() {
        let problem = Problem {
            volunteer: "JANE DOE (SHEFFIELD SQUIDS) HR AR SR".to_string(),
            kind: ProblemKind::NotFound,
            missing: Qualification::ALL.to_vec(),
        };
        assert_eq!(
            problem.lines(),
            vec![
                "JANE DOE (SHEFFIELD SQUIDS) HR AR SR: NOT FOUND:",
                "\tHR missing.",
                "\tAR missing.",
                "\tSR missing",
            ]
        );
    }
}
