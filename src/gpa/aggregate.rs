use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::GpaError;
use crate::transcript::AcademicRecord;

/// Which part of the transcript a GPA is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Overall,
    OneSemester,
}

impl FromStr for Mode {
    type Err = GpaError;

    /// Accepts the menu number or the mode name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "overall" => Ok(Mode::Overall),
            "2" | "one semester" | "one-semester" | "semester" => Ok(Mode::OneSemester),
            other => Err(GpaError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Overall => f.write_str("overall"),
            Mode::OneSemester => f.write_str("one semester"),
        }
    }
}

/// Drops every record whose subject code contains any exemption code,
/// anywhere in the string.
pub fn without_exemptions<S: AsRef<str>>(
    records: &[AcademicRecord],
    exemptions: &[S],
) -> Vec<AcademicRecord> {
    records
        .iter()
        .filter(|r| {
            !exemptions
                .iter()
                .any(|code| r.subject_code.contains(code.as_ref()))
        })
        .cloned()
        .collect()
}

/// Keeps records whose semester label equals `label` exactly.
pub fn in_semester(records: &[AcademicRecord], label: &str) -> Vec<AcademicRecord> {
    records
        .iter()
        .filter(|r| r.semester_label == label)
        .cloned()
        .collect()
}

/// Drops courses that are still in progress or not started.
pub fn graded_only(records: &[AcademicRecord]) -> Vec<AcademicRecord> {
    records
        .iter()
        .filter(|r| r.status.is_graded())
        .cloned()
        .collect()
}

/// Returns the records that count toward the GPA for the given parameters.
///
/// # Errors
///
/// [`GpaError::MissingSemester`] when `mode` is [`Mode::OneSemester`] and no
/// semester label was given.
pub fn filter_records<S: AsRef<str>>(
    records: &[AcademicRecord],
    mode: Mode,
    exemptions: &[S],
    semester: Option<&str>,
) -> Result<Vec<AcademicRecord>, GpaError> {
    let remaining = without_exemptions(records, exemptions);

    let remaining = match (mode, semester) {
        (Mode::Overall, _) => remaining,
        (Mode::OneSemester, Some(label)) => in_semester(&remaining, label),
        (Mode::OneSemester, None) => return Err(GpaError::MissingSemester),
    };

    let remaining = graded_only(&remaining);
    debug!(
        total = records.len(),
        remaining = remaining.len(),
        "Filtered transcript records"
    );
    Ok(remaining)
}

pub fn total_credits(records: &[AcademicRecord]) -> f64 {
    records.iter().map(|r| r.credit).sum()
}

/// Computes `Σ(grade × credit) / Σ(credit)`.
///
/// An empty slice yields `0.0`.
///
/// # Errors
///
/// [`GpaError::NoCreditBearingRecords`] when records remain but their
/// credits sum to zero.
pub fn weighted_average(records: &[AcademicRecord]) -> Result<f64, GpaError> {
    if records.is_empty() {
        return Ok(0.0);
    }

    let credits = total_credits(records);
    if credits == 0.0 {
        return Err(GpaError::NoCreditBearingRecords);
    }

    let weighted: f64 = records.iter().map(|r| r.grade * r.credit).sum();
    Ok(weighted / credits)
}

/// Computes the credit-weighted GPA. The input records are never modified.
#[tracing::instrument(skip(records, exemptions), fields(records = records.len()))]
pub fn compute_gpa<S: AsRef<str>>(
    records: &[AcademicRecord],
    mode: Mode,
    exemptions: &[S],
    semester: Option<&str>,
) -> Result<f64, GpaError> {
    let remaining = filter_records(records, mode, exemptions, semester)?;
    weighted_average(&remaining)
}
