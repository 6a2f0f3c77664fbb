//! JSON output formatting for revue.

use serde_json::json;

use crate::core::schedule;
use crate::error::RevueError;
use crate::jobs::QueuedJob;
use crate::model::{Group, Page, PageReviewState, User};

use super::SettingsView;

/// Format the overdue report as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_report_json(states: &[PageReviewState]) -> Result<String, RevueError> {
    let output = json!({
        "count": states.len(),
        "pages": states
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a page's effective settings as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_settings_json(view: &SettingsView) -> Result<String, RevueError> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Format pages as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_pages_json(pages: &[Page]) -> Result<String, RevueError> {
    let output = json!({
        "count": pages.len(),
        "pages": pages
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format users as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_users_json(users: &[User]) -> Result<String, RevueError> {
    let output = json!({
        "count": users.len(),
        "users": users
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format groups as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_groups_json(groups: &[Group]) -> Result<String, RevueError> {
    let output = json!({
        "count": groups.len(),
        "groups": groups
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the job queue as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_jobs_json(jobs: &[QueuedJob]) -> Result<String, RevueError> {
    let output = json!({
        "count": jobs.len(),
        "jobs": jobs
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the review frequency schedule as JSON
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_schedule_json() -> Result<String, RevueError> {
    let entries: Vec<_> = schedule::entries()
        .iter()
        .map(|(days, label)| json!({ "days": days, "label": label }))
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "schedule": entries }))?)
}
