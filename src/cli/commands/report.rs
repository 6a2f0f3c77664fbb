//! The report command: pages overdue for review.

use chrono::Utc;

use crate::cli::args::{OutputFormat, ReportArgs};
use crate::config::Config;
use crate::error::RevueError;
use crate::output;
use crate::report::{pages_due_for_review, ReportFilter};
use crate::storage::{Database, MemberStore};

use super::find_user;

/// Execute the report command
///
/// # Errors
///
/// Returns an error if the `--mine` user cannot be found or the database
/// query fails. Pages whose settings cannot be resolved are skipped with a
/// warning rather than failing the whole report.
pub fn report(
    db: &Database,
    args: &ReportArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<String, RevueError> {
    let only_owned_by = match &args.mine {
        Some(reference) => {
            let members = MemberStore::new(db);
            Some(find_user(&members, reference)?.id)
        }
        None => None,
    };

    let filter = ReportFilter {
        include_virtual: args.include_virtual || config.report.include_virtual,
        only_owned_by,
    };

    let states: Vec<_> = pages_due_for_review(db, filter, Utc::now())?.collect();
    output::format_report(&states, format)
}
