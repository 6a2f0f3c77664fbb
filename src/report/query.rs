//! Overdue-page selection.
//!
//! Composes the settings resolver and due-date calculator across the live
//! page set. Evaluation is lazy over a fresh snapshot of live page IDs; pages
//! whose settings cannot be resolved are skipped with a warning instead of
//! failing the whole report.

use chrono::{DateTime, Utc};
use log::warn;

use crate::core::duedate;
use crate::error::RevueError;
use crate::model::{PageReviewState, PageType, UserId};
use crate::storage::{Database, MemberStore, PageStore, ReviewLogStore};

/// Filters for the review report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    /// Include virtual (alias) pages. Off by default.
    pub include_virtual: bool,
    /// Only pages whose effective owners contain this user.
    pub only_owned_by: Option<UserId>,
}

/// All pages currently overdue for review, against live content only.
///
/// Returns a lazy sequence over a snapshot of the live page IDs taken at call
/// time; it is not restartable across mutations. Draft-only edits never
/// trigger review, and unpublished pages never appear.
///
/// # Errors
///
/// Returns an error if the initial page snapshot cannot be read. Per-page
/// resolution failures (cyclic hierarchy, missing site default) are logged
/// and skipped.
pub fn pages_due_for_review<'a>(
    db: &'a Database,
    filter: ReportFilter,
    now: DateTime<Utc>,
) -> Result<impl Iterator<Item = PageReviewState> + 'a, RevueError> {
    let ids = PageStore::new(db).live_page_ids()?;

    Ok(ids.into_iter().filter_map(move |id| {
        let pages = PageStore::new(db);
        let members = MemberStore::new(db);
        let logs = ReviewLogStore::new(db);

        let page = match pages.get(id) {
            Ok(Some(page)) => page,
            // Deleted since the snapshot was taken
            Ok(None) => return None,
            Err(e) => {
                warn!("skipping page {id}: {e}");
                return None;
            }
        };

        if !filter.include_virtual && page.page_type == PageType::Virtual {
            return None;
        }

        let state = match duedate::review_state(&pages, &members, &logs, &page, now) {
            Ok(state) => state,
            Err(e) => {
                warn!("skipping \"{}\": {e}", page.title);
                return None;
            }
        };

        if !state.is_overdue {
            return None;
        }

        if let Some(user_id) = filter.only_owned_by {
            if !state.effective_owners.iter().any(|u| u.id == user_id) {
                return None;
            }
        }

        Some(state)
    }))
}
