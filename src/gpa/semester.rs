//! Turns loosely typed semester names into transcript labels.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::GpaError;

/// Checked in order; the first abbreviation found wins.
const SEASONS: [(&str, &str); 3] = [("sp", "Spring"), ("su", "Summer"), ("fa", "Fall")];

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new("[0-9]+").expect("static regex is valid"))
}

/// Formats user input such as `"fa23"`, `"Spring 2024"` or `"summer-24"` into
/// the transcript's `Season + YYYY` label.
///
/// The last run of digits is the year; two digits are read as `20YY`.
///
/// # Errors
///
/// [`GpaError::InvalidSemester`] when no season abbreviation is present or
/// the year is not 2 or 4 digits long.
pub fn format_semester_label(input: &str) -> Result<String, GpaError> {
    let name = input.trim().to_lowercase();
    let invalid = || GpaError::InvalidSemester(input.trim().to_string());

    let season = SEASONS
        .iter()
        .find(|(abbr, _)| name.contains(abbr))
        .map(|(_, season)| *season)
        .ok_or_else(invalid)?;

    let year = digits()
        .find_iter(&name)
        .last()
        .map(|m| m.as_str())
        .ok_or_else(invalid)?;

    match year.len() {
        2 => Ok(format!("{season}20{year}")),
        4 => Ok(format!("{season}{year}")),
        _ => Err(invalid()),
    }
}
