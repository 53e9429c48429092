use crate::domain::model::{QualificationReport, ReportRow};
use crate::utils::error::{CheckError, Result};

/// Qualification table with header `Name,Club,HR,AR,SR,IQA Database`.
pub fn render_qualified_table(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(ReportRow::HEADER)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    writer.into_inner().map_err(|e| CheckError::ProcessingError {
        message: format!("failed to finish qualification table: {}", e),
    })
}

/// Problem log: an optional incomplete-registry warning, then one block per
/// volunteer whose claims could not be confirmed.
pub fn render_problem_log(report: &QualificationReport) -> String {
    let mut lines = Vec::new();
    if let Some(reason) = &report.directory_warning {
        lines.push(format!(
            "WARNING: referee directory may be incomplete ({})",
            reason
        ));
    }
    for problem in &report.problems {
        lines.extend(problem.lines());
    }

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Problem, ProblemKind, Qualification, QualificationStatus, RegistryStatus,
    };

    fn row(registry: RegistryStatus) -> ReportRow {
        ReportRow {
            name: "JANE DOE".to_string(),
            club: "SHEFFIELD SQUIDS".to_string(),
            head_referee: QualificationStatus::Yes,
            assistant_referee: QualificationStatus::No,
            snitch_referee: QualificationStatus::No,
            registry,
        }
    }

    #[test]
    fn test_render_qualified_table() {
        let table = render_qualified_table(&[
            row(RegistryStatus::Found),
            row(RegistryStatus::CheckedManually),
        ])
        .unwrap();

        assert_eq!(
            String::from_utf8(table).unwrap(),
            "Name,Club,HR,AR,SR,IQA Database\n\
             JANE DOE,SHEFFIELD SQUIDS,Yes,No,No,Yes\n\
             JANE DOE,SHEFFIELD SQUIDS,Yes,No,No,Checked manually\n"
        );
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = render_qualified_table(&[]).unwrap();
        assert_eq!(
            String::from_utf8(table).unwrap(),
            "Name,Club,HR,AR,SR,IQA Database\n"
        );
    }

    #[test]
    fn test_render_problem_log_with_warning() {
        let report = QualificationReport {
            rows: vec![],
            problems: vec![Problem {
                volunteer: "JANE DOE (SHEFFIELD SQUIDS) HR".to_string(),
                kind: ProblemKind::NotQualified,
                missing: vec![Qualification::HeadReferee],
            }],
            directory_warning: Some("page 3 failed".to_string()),
        };

        assert_eq!(
            render_problem_log(&report),
            "WARNING: referee directory may be incomplete (page 3 failed)\n\
             JANE DOE (SHEFFIELD SQUIDS) HR: NOT QUALIFIED:\n\
             \tHR missing.\n"
        );
    }

    #[test]
    fn test_clean_report_is_empty() {
        assert_eq!(render_problem_log(&QualificationReport::default()), "");
    }
}
