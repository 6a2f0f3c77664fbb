//! The review command: mark a page as reviewed.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, ReviewArgs};
use crate::core::{duedate, owners, resolver};
use crate::error::RevueError;
use crate::storage::{Database, MemberStore, PageStore, ReviewLogStore};

use super::{find_page, find_user};

/// Execute the review command
///
/// # Errors
///
/// Returns `RevueError::Permission` when the acting user is not a content
/// owner of the page, or when review tracking is disabled for it.
pub fn review(db: &Database, args: &ReviewArgs, format: OutputFormat) -> Result<String, RevueError> {
    let pages = PageStore::new(db);
    let members = MemberStore::new(db);
    let logs = ReviewLogStore::new(db);
    let now = Utc::now();

    let page = find_page(&pages, &args.page)?;
    let reviewer = find_user(&members, &args.acting_as)?;

    let effective = resolver::resolve(&pages, &page)?;
    let allowed = match effective.config() {
        Some(config) => owners::can_review(&members, reviewer.id, config)?,
        None => false,
    };
    if !allowed {
        return Err(RevueError::Permission(format!(
            "{} is not a content owner of \"{}\"",
            reviewer.name, page.title
        )));
    }

    let entry = logs.append(page.id, reviewer.id, args.note.as_deref().unwrap_or(""), now)?;
    let state = duedate::review_state(&pages, &members, &logs, &page, now)?;

    match format {
        OutputFormat::Pretty => {
            let mut output = format!(
                "Marked {} as reviewed by {}",
                page.title.bold(),
                reviewer.name.cyan()
            );
            if let Some(due) = state.next_due_date {
                output.push_str(&format!("\n  next review due {}", due.format("%Y-%m-%d")));
            }
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "status": "reviewed",
            "entry": entry,
            "next_due_date": state.next_due_date
        }))?),
    }
}
