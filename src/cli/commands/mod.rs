//! Command implementations for revue.
//!
//! This module contains the implementation of all CLI commands.

mod job;
mod members;
mod page;
mod report;
mod review;
mod settings;

pub use job::job;
pub use members::{group, user};
pub use page::page;
pub use report::report;
pub use review::review;
pub use settings::{settings, site};

use chrono::{DateTime, Utc};

use crate::cli::args::OutputFormat;
use crate::core::{owners, resolver};
use crate::error::RevueError;
use crate::model::{Group, Page, PageId, User};
use crate::output::format_schedule;
use crate::storage::{MemberStore, PageStore};

/// Execute schedule command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn schedule(format: OutputFormat) -> Result<String, RevueError> {
    format_schedule(format)
}

/// Look up a page by slug, or by ID if the reference is numeric.
pub(crate) fn find_page(pages: &PageStore<'_>, reference: &str) -> Result<Page, RevueError> {
    if let Ok(id) = reference.parse::<PageId>() {
        return pages.require(id);
    }
    pages
        .get_by_slug(reference)?
        .ok_or_else(|| RevueError::NotFound(format!("page '{reference}'")))
}

/// Look up a user by name, or by ID if the reference is numeric.
pub(crate) fn find_user(members: &MemberStore<'_>, reference: &str) -> Result<User, RevueError> {
    if let Ok(id) = reference.parse::<i64>() {
        return members.require_user(id);
    }
    members
        .get_user_by_name(reference)?
        .ok_or_else(|| RevueError::NotFound(format!("user '{reference}'")))
}

/// Look up a group by name, or by ID if the reference is numeric.
pub(crate) fn find_group(members: &MemberStore<'_>, reference: &str) -> Result<Group, RevueError> {
    if let Ok(id) = reference.parse::<i64>() {
        return members.require_group(id);
    }
    members
        .get_group_by_name(reference)?
        .ok_or_else(|| RevueError::NotFound(format!("group '{reference}'")))
}

/// Turn a title into a URL slug.
pub(crate) fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Refresh a page's denormalized display caches (`owner_names` and, when an
/// editor is acting, `last_edited_by_name`).
///
/// Pages whose inheritance chain cannot be resolved get an empty owner
/// display; the save itself must not fail over a display cache.
pub(crate) fn refresh_display_cache(
    pages: &PageStore<'_>,
    members: &MemberStore<'_>,
    page_id: PageId,
    editor: Option<&User>,
    now: DateTime<Utc>,
) -> Result<(), RevueError> {
    let page = pages.require(page_id)?;

    let names = match resolver::resolve(pages, &page) {
        Ok(effective) => owners::owner_names(members, &effective)?,
        Err(RevueError::Configuration(_)) => String::new(),
        Err(e) => return Err(e),
    };

    pages.set_display_cache(
        page_id,
        &names,
        editor.map(|u| (u.name.as_str(), u.id)),
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Home"), "home");
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  FAQ & Help!  "), "faq-help");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_find_page_by_id_or_slug() {
        let db = crate::storage::Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);
        let page = pages
            .insert(
                &crate::storage::NewPage {
                    title: "Home",
                    slug: "home",
                    parent_id: None,
                    virtual_of: None,
                },
                chrono::Utc::now(),
            )
            .unwrap();

        assert_eq!(find_page(&pages, "home").unwrap().id, page.id);
        assert_eq!(find_page(&pages, &page.id.to_string()).unwrap().id, page.id);
        assert!(find_page(&pages, "missing").is_err());
    }
}
