//! Error types shared by the transcript, GPA and exemption modules.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading a transcript file. All of these are recoverable:
/// the caller reports them and asks for another file.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("No such file or directory '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable CSV transcript: {0}")]
    Csv(#[from] csv::Error),

    #[error("Transcript columns do not match. Expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    #[error("Unreadable Excel transcript: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Unreadable HTML transcript: {0}")]
    Html(String),

    #[error("Transcript contains no rows")]
    EmptyTranscript,
}

/// Failures of the GPA aggregation parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpaError {
    #[error("You chose 'one semester' mode but did not specify semester name.")]
    MissingSemester,

    #[error("Every remaining subject carries 0 credits, so no GPA can be computed")]
    NoCreditBearingRecords,

    #[error("Unknown mode '{0}'. Choose 1 (overall) or 2 (one semester)")]
    UnknownMode(String),

    #[error("Cannot understand semester '{0}'. Try something like 'fa23' or 'Spring 2024'")]
    InvalidSemester(String),
}

/// Failures while editing the exemption list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExemptionError {
    #[error("Subject code must not be empty")]
    EmptyCode,

    #[error("'{0}' is not in the exemption list")]
    NotListed(String),

    #[error("Unknown action '{0}'. Type 'add', 'remove' or 'ok'")]
    UnknownAction(String),
}
