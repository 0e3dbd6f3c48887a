//! Data types used by the transcript pipeline.

use serde::Serialize;
use std::fmt;

/// Column names of a transcript export, in the order they must appear.
pub const TRANSCRIPT_COLUMNS: [&str; 10] = [
    "No",
    "Term",
    "Semester",
    "Subject Code",
    "prerequisite",
    "Replaced Subject",
    "Subject Name",
    "Credit",
    "Grade",
    "Status",
];

/// A single row of a transcript before normalization.
///
/// Every cell is optional; blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub no: Option<String>,
    pub term: Option<String>,
    pub semester: Option<String>,
    pub subject_code: Option<String>,
    pub prerequisite: Option<String>,
    pub replaced_subject: Option<String>,
    pub subject_name: Option<String>,
    pub credit: Option<String>,
    pub grade: Option<String>,
    pub status: Option<String>,
}

pub type RawTable = Vec<RawRow>;

impl RawRow {
    /// Builds a row from positional cells. Missing trailing cells are blank,
    /// cells beyond the tenth are ignored.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots: [Option<String>; 10] = Default::default();
        for (slot, cell) in slots.iter_mut().zip(cells) {
            *slot = non_blank(cell.as_ref());
        }
        let [
            no,
            term,
            semester,
            subject_code,
            prerequisite,
            replaced_subject,
            subject_name,
            credit,
            grade,
            status,
        ] = slots;

        RawRow {
            no,
            term,
            semester,
            subject_code,
            prerequisite,
            replaced_subject,
            subject_name,
            credit,
            grade,
            status,
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == RawRow::default()
    }
}

fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Course status as printed in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Status {
    Studying,
    NotStarted,
    Completed,
    NotPassed,
    Retaken,
    Other(String),
}

impl Status {
    /// Parses a status label, ignoring case, spaces, hyphens and underscores.
    pub fn parse(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(*c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "studying" => Status::Studying,
            "notstarted" => Status::NotStarted,
            "passed" | "completed" => Status::Completed,
            "notpassed" | "failed" => Status::NotPassed,
            "retaken" | "retake" => Status::Retaken,
            _ => Status::Other(label.trim().to_string()),
        }
    }

    /// In-progress and not-yet-taken courses never count toward a GPA.
    pub fn is_graded(&self) -> bool {
        !matches!(self, Status::Studying | Status::NotStarted)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Studying => f.write_str("Studying"),
            Status::NotStarted => f.write_str("Not started"),
            Status::Completed => f.write_str("Passed"),
            Status::NotPassed => f.write_str("Not passed"),
            Status::Retaken => f.write_str("Retaken"),
            Status::Other(label) => f.write_str(label),
        }
    }
}

/// One normalized transcript row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcademicRecord {
    pub sequence_number: Option<u32>,
    pub term: u32,
    pub semester_label: String,
    pub subject_code: String,
    pub prerequisite: Option<String>,
    pub replaced_subject: Option<String>,
    pub subject_name: String,
    pub credit: f64,
    pub grade: f64,
    pub status: Status,
}
