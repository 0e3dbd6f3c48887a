//! Subjects excluded from GPA calculation.
//!
//! [`ExemptionStore`] persists the list as JSON.
//! [`ExemptionEdit`] describes one add/remove change to it.

mod edit;
mod store;

pub use edit::{ExemptionEdit, normalize_code};
pub use store::{DEFAULT_EXEMPTIONS, ExemptionStore, default_exemptions};
