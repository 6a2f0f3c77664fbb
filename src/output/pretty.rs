use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::core::schedule;
use crate::jobs::QueuedJob;
use crate::model::{Group, Page, PageReviewState, User};

use super::SettingsView;

fn short_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Format the overdue report as a pretty list
pub fn format_report_pretty(states: &[PageReviewState]) -> String {
    if states.is_empty() {
        return "Pages due for review (0 pages)\n  Nothing is overdue".to_string();
    }

    let mut output = format!("Pages due for review ({} pages)\n", states.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for state in states {
        let mut line = format!("{}", state.title.bold());

        if let Some(due) = state.next_due_date {
            line.push_str(&format!("  due {}", short_date(due).red()));
        }
        if let Some(last) = state.last_review_date {
            line.push_str(&format!("  last reviewed {}", short_date(last).yellow()));
        }
        output.push_str(&line);
        output.push('\n');

        if !state.owner_names.is_empty() {
            output.push_str(&format!("    {}: {}\n", "owners".dimmed(), state.owner_names.cyan()));
        }
        if !state.last_edited_by_name.is_empty() {
            output.push_str(&format!(
                "    {}: {}\n",
                "edited by".dimmed(),
                state.last_edited_by_name
            ));
        }
        output.push_str(&format!(
            "    {}  {}\n",
            state.url.dimmed(),
            format!("({})", state.settings).dimmed()
        ));
    }

    output
}

/// Format a single page's effective settings as pretty output
pub fn format_settings_pretty(view: &SettingsView) -> String {
    let state = &view.state;

    let mut output = format!("{}\n", state.title.bold());
    output.push_str(&format!("  {}: {}\n", "URL".dimmed(), state.url));
    output.push_str(&format!("  {}: {}\n", "Settings".dimmed(), state.settings));
    output.push_str(&format!("  {}: {}\n", "Frequency".dimmed(), view.frequency));

    let owners = if state.owner_names.is_empty() {
        "(none)".to_string()
    } else {
        state.owner_names.clone()
    };
    output.push_str(&format!("  {}: {}\n", "Owners".dimmed(), owners));

    let due = state
        .next_due_date
        .map_or_else(|| "(not set)".to_string(), short_date);
    if state.is_overdue {
        output.push_str(&format!("  {}: {}\n", "Next review".dimmed(), due.red().bold()));
    } else {
        output.push_str(&format!("  {}: {}\n", "Next review".dimmed(), due));
    }

    if let Some(last) = state.last_review_date {
        output.push_str(&format!("  {}: {}\n", "Last reviewed".dimmed(), short_date(last)));
    }

    if !view.logs.is_empty() {
        output.push_str(&format!("  {}:\n", "Review notes".dimmed()));
        for log in &view.logs {
            let note = if log.note.is_empty() { "(no note)" } else { &log.note };
            output.push_str(&format!(
                "    {} {} {}\n",
                short_date(log.created_at).yellow(),
                log.reviewer.cyan(),
                note
            ));
        }
    }

    output
}

/// Format a list of pages as pretty output
pub fn format_pages_pretty(pages: &[Page]) -> String {
    if pages.is_empty() {
        return "Pages (0)\n  No pages".to_string();
    }

    let mut output = format!("Pages ({})\n", pages.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for page in pages {
        let status = if page.is_published() {
            "live".green()
        } else {
            "draft".yellow()
        };

        let mut line = format!("{:>4}  {} [{}]", page.id, page.title.bold(), status);
        line.push_str(&format!("  {}", format!("/{}", page.slug).dimmed()));
        line.push_str(&format!("  {}", page.review_mode.to_string().cyan()));
        if page.virtual_of.is_some() {
            line.push_str(&format!("  {}", "virtual".magenta()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a list of users as pretty output
pub fn format_users_pretty(users: &[User]) -> String {
    if users.is_empty() {
        return "Users (0)\n  No users".to_string();
    }

    let mut output = format!("Users ({})\n", users.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for user in users {
        let mut line = format!("{:>4}  {}", user.id, user.name.bold());
        if let Some(email) = &user.email {
            line.push_str(&format!("  {}", email.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a list of groups as pretty output
pub fn format_groups_pretty(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "Groups (0)\n  No groups".to_string();
    }

    let mut output = format!("Groups ({})\n", groups.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for group in groups {
        let mut line = format!("{:>4}  {}", group.id, group.name.bold());
        if let Some(parent) = group.parent_id {
            line.push_str(&format!("  {}", format!("sub-group of {parent}").dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format the job queue as pretty output
pub fn format_jobs_pretty(jobs: &[QueuedJob]) -> String {
    if jobs.is_empty() {
        return "Queued jobs (0)\n  No jobs queued".to_string();
    }

    let mut output = format!("Queued jobs ({})\n", jobs.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for job in jobs {
        output.push_str(&format!(
            "{:>4}  {}  runs {}  [{}]\n",
            job.id,
            job.kind.bold(),
            job.run_at.format("%Y-%m-%d %H:%M"),
            job.status.cyan()
        ));
    }

    output
}

/// Format the review frequency schedule as pretty output
pub fn format_schedule_pretty() -> String {
    let mut output = "Review frequencies\n".to_string();
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (days, label) in schedule::entries() {
        output.push_str(&format!("{:>4} days  {}\n", days, label));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SettingsProvenance;

    fn sample_state(overdue: bool) -> PageReviewState {
        PageReviewState {
            page_id: 1,
            title: "Home".to_string(),
            url: "/home".to_string(),
            last_review_date: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            next_due_date: Some("2024-02-01T00:00:00Z".parse().unwrap()),
            is_overdue: overdue,
            effective_owners: vec![],
            owner_names: "editors".to_string(),
            last_edited_by_name: "alice".to_string(),
            settings: SettingsProvenance::Custom,
        }
    }

    #[test]
    fn test_empty_report() {
        let output = format_report_pretty(&[]);
        assert!(output.contains("0 pages"));
        assert!(output.contains("Nothing is overdue"));
    }

    #[test]
    fn test_report_contains_columns() {
        let output = format_report_pretty(&[sample_state(true)]);
        assert!(output.contains("Home"));
        assert!(output.contains("2024-02-01"));
        assert!(output.contains("editors"));
        assert!(output.contains("alice"));
        assert!(output.contains("/home"));
        assert!(output.contains("custom"));
    }

    #[test]
    fn test_settings_view() {
        let view = SettingsView {
            state: sample_state(false),
            frequency: "1 month".to_string(),
            logs: vec![],
        };
        let output = format_settings_pretty(&view);
        assert!(output.contains("1 month"));
        assert!(output.contains("editors"));
    }

    #[test]
    fn test_schedule_table() {
        let output = format_schedule_pretty();
        assert!(output.contains("No automatic review date"));
        assert!(output.contains("12 months"));
    }
}
