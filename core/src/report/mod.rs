//! Batch summaries: aggregate counts, per-task outcomes, human and JSON forms.

mod format;
mod persist;
mod summary;

pub use format::format_report;
pub use persist::save_report;
pub use summary::{summarize, BatchSummary, TaskOutcome};
