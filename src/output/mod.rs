//! Output formatting for revue.
//!
//! This module provides formatters for displaying review data in various
//! formats.

mod json;
mod pretty;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::RevueError;
use crate::jobs::QueuedJob;
use crate::model::{Group, Page, PageReviewState, User};

pub use json::*;
pub use pretty::*;

/// A review log entry with the reviewer name resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewLogView {
    pub reviewer: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Everything the `settings show` command displays for one page.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    #[serde(flatten)]
    pub state: PageReviewState,
    /// Review frequency label from the schedule table.
    pub frequency: String,
    pub logs: Vec<ReviewLogView>,
}

/// Format the overdue report based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_report(
    states: &[PageReviewState],
    format: OutputFormat,
) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(states)),
        OutputFormat::Json => format_report_json(states),
    }
}

/// Format a page's effective settings based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_settings(view: &SettingsView, format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(view)),
        OutputFormat::Json => format_settings_json(view),
    }
}

/// Format a page list based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_pages(pages: &[Page], format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_pages_pretty(pages)),
        OutputFormat::Json => format_pages_json(pages),
    }
}

/// Format a user list based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_users(users: &[User], format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_users_pretty(users)),
        OutputFormat::Json => format_users_json(users),
    }
}

/// Format a group list based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_groups(groups: &[Group], format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_groups_pretty(groups)),
        OutputFormat::Json => format_groups_json(groups),
    }
}

/// Format the job queue based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_jobs(jobs: &[QueuedJob], format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_jobs_pretty(jobs)),
        OutputFormat::Json => format_jobs_json(jobs),
    }
}

/// Format the review schedule table based on output format.
///
/// # Errors
///
/// Returns `RevueError::Parse` if JSON serialization fails.
pub fn format_schedule(format: OutputFormat) -> Result<String, RevueError> {
    match format {
        OutputFormat::Pretty => Ok(format_schedule_pretty()),
        OutputFormat::Json => format_schedule_json(),
    }
}
