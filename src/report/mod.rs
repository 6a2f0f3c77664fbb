//! The "pages due for review" report.

mod query;

pub use query::{pages_due_for_review, ReportFilter};
