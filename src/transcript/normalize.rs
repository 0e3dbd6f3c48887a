//! Folds the appended in-progress/retake sub-table into the main schema.
//!
//! Transcript exports list retaken and in-progress courses in a second block
//! below the main table. That block is separated by a blank row and its own
//! header row, and its values sit one or more columns to the left of where
//! the main schema expects them.

use tracing::debug;

use super::types::{AcademicRecord, RawRow, RawTable, Status};

/// Rows discarded at the sub-table boundary (blank row + sub-table header).
const SEPARATOR_ROWS: usize = 2;

/// Normalizes a schema-conformant raw table into academic records.
///
/// Row order is preserved apart from the two separator rows. Missing credit
/// and grade values become `0`.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn normalize(table: RawTable) -> Vec<AcademicRecord> {
    let mut rows = table;

    if let Some(boundary) = find_sub_table(&rows) {
        let end = (boundary + SEPARATOR_ROWS).min(rows.len());
        rows.drain(boundary..end);

        for row in rows.iter_mut().skip(boundary) {
            *row = shift_sub_table_row(std::mem::take(row));
        }

        debug!(
            boundary,
            sub_table_rows = rows.len().saturating_sub(boundary),
            "Merged sub-table"
        );
    }

    rows.into_iter().map(to_record).collect()
}

/// The sub-table starts at the first row with a blank `No`, or failing that,
/// at the first row with a blank `Status`.
fn find_sub_table(rows: &[RawRow]) -> Option<usize> {
    rows.iter()
        .position(|r| r.no.is_none())
        .or_else(|| rows.iter().position(|r| r.status.is_none()))
}

fn shift_sub_table_row(row: RawRow) -> RawRow {
    RawRow {
        no: row.no,
        term: Some("0".to_string()),
        semester: row.term,
        subject_code: row.semester,
        prerequisite: None,
        replaced_subject: None,
        subject_name: row.subject_code,
        credit: row.prerequisite,
        grade: row.replaced_subject,
        status: row.subject_name,
    }
}

fn to_record(row: RawRow) -> AcademicRecord {
    AcademicRecord {
        sequence_number: row.no.as_deref().and_then(parse_ordinal),
        term: row.term.as_deref().and_then(parse_ordinal).unwrap_or(0),
        semester_label: row.semester.unwrap_or_default(),
        subject_code: row.subject_code.unwrap_or_default(),
        prerequisite: row.prerequisite,
        replaced_subject: row.replaced_subject,
        subject_name: row.subject_name.unwrap_or_default(),
        credit: row.credit.as_deref().and_then(parse_number).unwrap_or(0.0),
        grade: row.grade.as_deref().and_then(parse_number).unwrap_or(0.0),
        status: Status::parse(row.status.as_deref().unwrap_or_default()),
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `"3"` as well as spreadsheet-style `"3.0"`.
fn parse_ordinal(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    cell.parse::<u32>().ok().or_else(|| {
        parse_number(cell)
            .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32)
    })
}
