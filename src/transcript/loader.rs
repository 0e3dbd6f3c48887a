//! Reads transcript exports from disk.
//!
//! Supported layouts:
//! * Excel/OpenDocument workbooks (`.xlsx`, `.xls`, `.ods`): first worksheet,
//!   header row exactly matching [`TRANSCRIPT_COLUMNS`]
//! * CSV with a header row exactly matching [`TRANSCRIPT_COLUMNS`]
//! * HTML table exports (some portals serve these as `.xls`). Used only when
//!   the CSV path fails; the first table row is treated as the header and
//!   columns are assigned positionally.

use std::io;
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use csv::ReaderBuilder;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::types::{RawRow, RawTable, TRANSCRIPT_COLUMNS};
use crate::error::TranscriptError;

/// Loads a transcript file into a raw, schema-conformant table.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_transcript(path: &Path) -> Result<RawTable, TranscriptError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => TranscriptError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut table = if is_workbook(&bytes) {
        parse_workbook(path)?
    } else {
        let text = decode(bytes);
        match parse_csv(&text) {
            Ok(table) => table,
            Err(err) if looks_like_html(&text) => {
                debug!(error = %err, "CSV parse failed, trying HTML table");
                parse_html(&text)?
            }
            Err(err) => return Err(err),
        }
    };
    trim_trailing_blank_rows(&mut table);

    if table.is_empty() {
        return Err(TranscriptError::EmptyTranscript);
    }

    info!(rows = table.len(), "Transcript loaded");
    Ok(table)
}

/// Removes one pair of matching surrounding quotes, as added by terminals
/// when a file is dragged onto them.
pub fn strip_path_quotes(input: &str) -> &str {
    let input = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = input
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    input
}

/// Zip container (xlsx, ods) or OLE2 compound document (legacy xls).
fn is_workbook(bytes: &[u8]) -> bool {
    const ZIP: &[u8] = b"PK\x03\x04";
    const OLE2: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.starts_with(ZIP) || bytes.starts_with(OLE2)
}

fn parse_workbook(path: &Path) -> Result<RawTable, TranscriptError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TranscriptError::EmptyTranscript)??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    check_schema(header.iter().map(String::as_str))?;

    let rows: RawTable = rows
        .map(|cells| RawRow::from_cells(cells.iter().map(|c| c.to_string())))
        .collect();

    debug!(rows = rows.len(), "Parsed workbook transcript");
    Ok(rows)
}

/// Exports often end with fully blank rows; they carry no course.
fn trim_trailing_blank_rows(table: &mut RawTable) {
    while table.last().is_some_and(RawRow::is_blank) {
        table.pop();
    }
}

/// UTF-8 when valid, ISO-8859-1 otherwise. Every Latin-1 byte maps to the
/// code point of the same value.
fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("Transcript is not valid UTF-8, decoding as ISO-8859-1");
            err.into_bytes().iter().map(|&b| b as char).collect()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

fn parse_csv(text: &str) -> Result<RawTable, TranscriptError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    check_schema(headers.iter())?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawRow::from_cells(record.iter()));
    }

    debug!(rows = rows.len(), "Parsed CSV transcript");
    Ok(rows)
}

fn check_schema<'a>(headers: impl Iterator<Item = &'a str>) -> Result<(), TranscriptError> {
    let found: Vec<&str> = headers.collect();
    if found != TRANSCRIPT_COLUMNS {
        return Err(TranscriptError::SchemaMismatch {
            expected: TRANSCRIPT_COLUMNS.join(", "),
            found: found.join(", "),
        });
    }
    Ok(())
}

fn looks_like_html(text: &str) -> bool {
    text.to_ascii_lowercase().contains("<table")
}

fn parse_html(text: &str) -> Result<RawTable, TranscriptError> {
    let document = Html::parse_document(text);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| TranscriptError::Html("No table found".to_string()))?;

    let rows: RawTable = table
        .select(&row_selector)
        .skip(1)
        .map(|tr| {
            RawRow::from_cells(
                tr.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>()),
            )
        })
        .collect();

    debug!(rows = rows.len(), "Parsed HTML transcript");
    Ok(rows)
}

fn selector(css: &str) -> Result<Selector, TranscriptError> {
    Selector::parse(css).map_err(|e| TranscriptError::Html(e.to_string()))
}
