use crate::domain::model::{
    Evaluation, Problem, ProblemKind, Qualification, QualificationStatus, RefereeRecord,
    RegistryStatus, ReportRow, VolunteerRecord,
};

fn status(claimed: bool, confirmed: bool) -> QualificationStatus {
    match (claimed, confirmed) {
        (false, _) => QualificationStatus::No,
        (true, true) => QualificationStatus::Yes,
        (true, false) => QualificationStatus::Unqualified,
    }
}

/// Compares what a volunteer claims against their registry entry, if one was
/// found. A missing entry counts as holding nothing.
pub fn evaluate(volunteer: &VolunteerRecord, referee: Option<&RefereeRecord>) -> Evaluation {
    let claims = volunteer.record.qualifications();

    if volunteer.manually_verified {
        return Evaluation {
            row: ReportRow {
                name: volunteer.record.name().to_string(),
                club: volunteer.record.club().to_string(),
                head_referee: status(claims.head_referee, true),
                assistant_referee: status(claims.assistant_referee, true),
                snitch_referee: status(claims.snitch_referee, true),
                registry: RegistryStatus::CheckedManually,
            },
            problem: None,
        };
    }

    let confirmed = |q: Qualification| referee.is_some_and(|r| r.record.holds(q));

    let missing: Vec<Qualification> = claims.iter().filter(|q| !confirmed(*q)).collect();

    let problem = (!missing.is_empty()).then(|| Problem {
        volunteer: volunteer.to_string(),
        kind: if referee.is_some() {
            ProblemKind::NotQualified
        } else {
            ProblemKind::NotFound
        },
        missing,
    });

    Evaluation {
        row: ReportRow {
            name: volunteer.record.name().to_string(),
            club: volunteer.record.club().to_string(),
            head_referee: status(claims.head_referee, confirmed(Qualification::HeadReferee)),
            assistant_referee: status(
                claims.assistant_referee,
                confirmed(Qualification::AssistantReferee),
            ),
            snitch_referee: status(claims.snitch_referee, confirmed(Qualification::SnitchReferee)),
            registry: if referee.is_some() {
                RegistryStatus::Found
            } else {
                RegistryStatus::NotFound
            },
        },
        problem,
    }
}
