//! Page commands: add, list, show, publish.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, PageCommands};
use crate::core::{duedate, resolver, schedule};
use crate::error::RevueError;
use crate::output::{self, ReviewLogView, SettingsView};
use crate::storage::{Database, MemberStore, NewPage, PageStore, ReviewLogStore};

use super::{find_page, find_user, refresh_display_cache, slugify};

/// Execute page subcommands
///
/// # Errors
///
/// Returns an error if the page cannot be found or the database operation
/// fails.
pub fn page(
    db: &Database,
    cmd: PageCommands,
    format: OutputFormat,
) -> Result<String, RevueError> {
    match cmd {
        PageCommands::Add {
            title,
            slug,
            parent,
            virtual_of,
            acting_as,
        } => add(db, &title, slug.as_deref(), parent.as_deref(), virtual_of.as_deref(), acting_as.as_deref(), format),
        PageCommands::List => {
            let pages = PageStore::new(db).list()?;
            output::format_pages(&pages, format)
        }
        PageCommands::Show { page } => show(db, &page, format),
        PageCommands::Publish { page, acting_as } => {
            publish(db, &page, acting_as.as_deref(), format)
        }
    }
}

fn add(
    db: &Database,
    title: &str,
    slug: Option<&str>,
    parent: Option<&str>,
    virtual_of: Option<&str>,
    acting_as: Option<&str>,
    format: OutputFormat,
) -> Result<String, RevueError> {
    let pages = PageStore::new(db);
    let members = MemberStore::new(db);
    let now = Utc::now();

    let slug = slug.map_or_else(|| slugify(title), ToString::to_string);
    if slug.is_empty() {
        return Err(RevueError::Config(format!(
            "cannot derive a slug from \"{title}\"; pass --slug"
        )));
    }
    if pages.get_by_slug(&slug)?.is_some() {
        return Err(RevueError::Config(format!("slug '{slug}' is already taken")));
    }

    let parent_id = parent.map(|p| find_page(&pages, p)).transpose()?.map(|p| p.id);
    let virtual_of = virtual_of
        .map(|p| find_page(&pages, p))
        .transpose()?
        .map(|p| p.id);
    let editor = acting_as.map(|u| find_user(&members, u)).transpose()?;

    let page = pages.insert(
        &NewPage {
            title,
            slug: &slug,
            parent_id,
            virtual_of,
        },
        now,
    )?;
    refresh_display_cache(&pages, &members, page.id, editor.as_ref(), now)?;
    let page = pages.require(page.id)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "Added page {} {} (draft)",
            page.title.bold(),
            pages.path(&page)?.dimmed()
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "status": "added",
            "page": page
        }))?),
    }
}

/// Full detail for one page: resolved settings plus its review log.
///
/// Shared with `settings show`, which displays the same view.
pub(super) fn show(
    db: &Database,
    reference: &str,
    format: OutputFormat,
) -> Result<String, RevueError> {
    let pages = PageStore::new(db);
    let members = MemberStore::new(db);
    let logs = ReviewLogStore::new(db);

    let page = find_page(&pages, reference)?;
    let state = duedate::review_state(&pages, &members, &logs, &page, Utc::now())?;

    let effective = resolver::resolve(&pages, &page)?;
    let frequency = effective.config().map_or_else(
        || "Review tracking disabled".to_string(),
        |config| schedule::label_for(config.review_period_days),
    );

    let mut log_views = Vec::new();
    for entry in logs.list_for_page(page.id)? {
        log_views.push(ReviewLogView {
            reviewer: members.require_user(entry.reviewer_id)?.name,
            note: entry.note,
            created_at: entry.created_at,
        });
    }

    let view = SettingsView {
        state,
        frequency,
        logs: log_views,
    };
    output::format_settings(&view, format)
}

fn publish(
    db: &Database,
    reference: &str,
    acting_as: Option<&str>,
    format: OutputFormat,
) -> Result<String, RevueError> {
    let pages = PageStore::new(db);
    let members = MemberStore::new(db);
    let now = Utc::now();

    let page = find_page(&pages, reference)?;
    let editor = acting_as.map(|u| find_user(&members, u)).transpose()?;

    pages.publish(page.id, now)?;
    refresh_display_cache(&pages, &members, page.id, editor.as_ref(), now)?;
    let page = pages.require(page.id)?;

    match format {
        OutputFormat::Pretty => Ok(format!("Published {}", page.title.bold())),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "status": "published",
            "page": page
        }))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_list_publish() {
        let db = Database::open_in_memory().unwrap();

        let out = add(&db, "Home", None, None, None, None, OutputFormat::Pretty).unwrap();
        assert!(out.contains("Home"));
        assert!(out.contains("draft"));

        let out = page(&db, PageCommands::List, OutputFormat::Pretty).unwrap();
        assert!(out.contains("Pages (1)"));

        let out = publish(&db, "home", None, OutputFormat::Pretty).unwrap();
        assert!(out.contains("Published"));
    }

    #[test]
    fn test_add_rejects_duplicate_slug() {
        let db = Database::open_in_memory().unwrap();

        add(&db, "Home", None, None, None, None, OutputFormat::Pretty).unwrap();
        let err = add(&db, "Home", None, None, None, None, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, RevueError::Config(_)));
    }

    #[test]
    fn test_show_includes_frequency() {
        let db = Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);

        add(&db, "Home", None, None, None, None, OutputFormat::Pretty).unwrap();
        pages.set_site_default(30, &[], &[]).unwrap();

        let out = show(&db, "home", OutputFormat::Pretty).unwrap();
        assert!(out.contains("1 month"));
    }
}
