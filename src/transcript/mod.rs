//! Transcript loading and normalization.
//!
//! A transcript export is read into a [`RawTable`] of string cells, then
//! [`normalize`] folds the shifted in-progress/retake sub-table back into the
//! main schema and produces uniformly shaped [`AcademicRecord`]s.

pub mod loader;
pub mod normalize;
pub mod types;

pub use loader::{load_transcript, strip_path_quotes};
pub use normalize::normalize;
pub use types::{AcademicRecord, RawRow, RawTable, Status, TRANSCRIPT_COLUMNS};
