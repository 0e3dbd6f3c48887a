//! Presentation and persistence of GPA results.
//!
//! Supports two-decimal display, JSON reports, and CSV history append.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::gpa::{self, Mode};
use crate::transcript::AcademicRecord;

/// Formats a GPA the way it is shown to the user.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Summary of one GPA calculation.
///
/// Flat so it can be written as a CSV row.
#[derive(Debug, Default, Serialize)]
pub struct GpaReport {
    pub computed_at: DateTime<Utc>,
    pub source: String,
    pub mode: String,
    pub semester: Option<String>,
    pub exemptions: String,
    pub counted_subjects: usize,
    pub total_credits: f64,
    pub gpa: Option<f64>,
    pub error: Option<String>,
}

impl GpaReport {
    /// Runs the aggregation and captures its result (or its error).
    pub fn compute(
        source: &str,
        records: &[AcademicRecord],
        mode: Mode,
        exemptions: &[String],
        semester: Option<&str>,
    ) -> Self {
        let mut report = GpaReport {
            computed_at: Utc::now(),
            source: source.to_string(),
            mode: mode.to_string(),
            semester: semester.map(str::to_string),
            exemptions: exemptions.join(";"),
            ..Default::default()
        };

        let outcome = gpa::filter_records(records, mode, exemptions, semester).and_then(|kept| {
            report.counted_subjects = kept.len();
            report.total_credits = gpa::total_credits(&kept);
            gpa::weighted_average(&kept)
        });

        match outcome {
            Ok(score) => report.gpa = Some(score),
            Err(e) => report.error = Some(e.to_string()),
        }
        report
    }

    /// Line shown to the user.
    pub fn display_line(&self) -> String {
        match self.gpa {
            Some(score) => format!("Your GPA score is: {}", format_score(score)),
            None => self.error.clone().unwrap_or_default(),
        }
    }
}

/// Serializes a report as pretty JSON.
pub fn to_json(report: &GpaReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Appends a [`GpaReport`] as a row to a CSV history file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, report: &GpaReport) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending GPA history record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(report)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GpaError;
    use crate::transcript::Status;
    use std::fs;
    use tempfile::TempDir;

    fn records() -> Vec<AcademicRecord> {
        [("CSC101", "Fall2023", 4.0), ("MAT101", "Spring2024", 3.0)]
            .into_iter()
            .map(|(code, semester, grade)| AcademicRecord {
                sequence_number: None,
                term: 1,
                semester_label: semester.to_string(),
                subject_code: code.to_string(),
                prerequisite: None,
                replaced_subject: None,
                subject_name: code.to_string(),
                credit: 3.0,
                grade,
                status: Status::Completed,
            })
            .collect()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(3.5), "3.50");
        assert_eq!(format_score(0.0), "0.00");
        assert_eq!(format_score(3.14159), "3.14");
    }

    #[test]
    fn test_report_success() {
        let report = GpaReport::compute("t.csv", &records(), Mode::Overall, &["MAT".to_string()], None);

        assert_eq!(report.gpa, Some(4.0));
        assert_eq!(report.counted_subjects, 1);
        assert_eq!(report.total_credits, 3.0);
        assert_eq!(report.exemptions, "MAT");
        assert_eq!(report.display_line(), "Your GPA score is: 4.00");
    }

    #[test]
    fn test_report_missing_semester() {
        let report = GpaReport::compute("t.csv", &records(), Mode::OneSemester, &[], None);

        assert_eq!(report.gpa, None);
        assert_eq!(report.error, Some(GpaError::MissingSemester.to_string()));
        assert_eq!(report.display_line(), GpaError::MissingSemester.to_string());
    }

    #[test]
    fn test_to_json() {
        let report = GpaReport::compute("t.csv", &records(), Mode::Overall, &[], None);
        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(value["gpa"], serde_json::json!(3.5));
        assert_eq!(value["mode"], "overall");
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");

        let report = GpaReport::compute("t.csv", &records(), Mode::Overall, &[], None);
        append_record(&path, &report).unwrap();
        append_record(&path, &report).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l.contains("computed_at")).count(), 1);
    }
}
