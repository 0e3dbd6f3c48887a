//! Credit-weighted GPA aggregation.
//!
//! Normalized records pass through copy-on-write filter stages (exemptions,
//! semester, graded status) before the weighted mean is taken.

pub mod aggregate;
pub mod semester;

pub use aggregate::{
    Mode, compute_gpa, filter_records, graded_only, in_semester, total_credits, weighted_average,
    without_exemptions,
};
pub use semester::format_semester_label;
