//! Due-date calculation and derived review state.
//!
//! All comparisons are at timestamp granularity in UTC; callers must not mix
//! zones between stored dates and "now".

use chrono::{DateTime, Duration, Utc};

use crate::error::RevueError;
use crate::model::{Page, PageReviewState};
use crate::storage::{MemberStore, PageStore, ReviewLogStore};

use super::owners;
use super::resolver::{self, EffectiveSettings};

/// The date a page was last reviewed.
///
/// The most recent review log entry wins; a page never reviewed falls back to
/// the publish timestamp of its live version. A page never published has no
/// last-review date and can never become due.
pub fn last_review_date(
    logs: &ReviewLogStore<'_>,
    page: &Page,
) -> Result<Option<DateTime<Utc>>, RevueError> {
    if let Some(entry) = logs.latest_for_page(page.id)? {
        return Ok(Some(entry.created_at));
    }
    Ok(page.published_at)
}

/// The next review due date, given effective settings and the last review.
///
/// `None` when review tracking is disabled, the period is 0 (no automatic
/// date), or there is no last-review date to count from.
#[must_use]
pub fn next_due_date(
    effective: &EffectiveSettings,
    last_review: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let config = effective.config()?;
    if config.review_period_days == 0 {
        return None;
    }
    let last = last_review?;
    Some(last + Duration::days(i64::from(config.review_period_days)))
}

/// Whether a page is overdue for review at `now`.
///
/// True iff a due date exists and lies strictly before `now`.
pub fn is_overdue(
    pages: &PageStore<'_>,
    logs: &ReviewLogStore<'_>,
    page: &Page,
    now: DateTime<Utc>,
) -> Result<bool, RevueError> {
    let effective = resolver::resolve(pages, page)?;
    let last = last_review_date(logs, page)?;
    Ok(next_due_date(&effective, last).is_some_and(|due| due < now))
}

/// Compute the full derived review state for a page.
///
/// # Errors
///
/// Returns `RevueError::Configuration` when the settings inheritance chain
/// cannot be resolved.
pub fn review_state(
    pages: &PageStore<'_>,
    members: &MemberStore<'_>,
    logs: &ReviewLogStore<'_>,
    page: &Page,
    now: DateTime<Utc>,
) -> Result<PageReviewState, RevueError> {
    let effective = resolver::resolve(pages, page)?;
    let last = last_review_date(logs, page)?;
    let due = next_due_date(&effective, last);

    let path = pages.path(page)?;
    let url = if page.is_published() {
        path
    } else {
        format!("{path}?stage=draft")
    };

    Ok(PageReviewState {
        page_id: page.id,
        title: page.title.clone(),
        url,
        last_review_date: last,
        next_due_date: due,
        is_overdue: due.is_some_and(|d| d < now),
        effective_owners: owners::effective_owners(members, &effective)?,
        owner_names: owners::owner_names(members, &effective)?,
        last_edited_by_name: page.last_edited_by_name.clone(),
        settings: effective.provenance(page),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewConfig, ReviewMode, SettingsProvenance};
    use crate::storage::{Database, NewPage};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn custom_effective(period: u32) -> EffectiveSettings {
        EffectiveSettings::SiteDefault {
            config: ReviewConfig {
                mode: ReviewMode::Custom,
                review_period_days: period,
                owner_groups: vec![],
                owner_users: vec![],
            },
        }
    }

    #[test]
    fn test_next_due_date_disabled() {
        assert_eq!(
            next_due_date(&EffectiveSettings::Disabled, Some(ts("2024-01-01T00:00:00Z"))),
            None
        );
    }

    #[test]
    fn test_next_due_date_zero_period_never_due() {
        for last in [None, Some(ts("2024-01-01T00:00:00Z")), Some(ts("1970-01-01T00:00:00Z"))] {
            assert_eq!(next_due_date(&custom_effective(0), last), None);
        }
    }

    #[test]
    fn test_next_due_date_adds_period() {
        let due = next_due_date(&custom_effective(7), Some(ts("2024-01-01T09:30:00Z")));
        assert_eq!(due, Some(ts("2024-01-08T09:30:00Z")));
    }

    #[test]
    fn test_next_due_date_no_last_review() {
        assert_eq!(next_due_date(&custom_effective(7), None), None);
    }

    #[test]
    fn test_overdue_boundaries() {
        let db = Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);
        let logs = ReviewLogStore::new(&db);
        let members = MemberStore::new(&db);

        let reviewer = members.add_user("alice", None).unwrap();
        let page = pages
            .insert(
                &NewPage {
                    title: "Home",
                    slug: "home",
                    parent_id: None,
                    virtual_of: None,
                },
                ts("2024-01-01T00:00:00Z"),
            )
            .unwrap();
        pages
            .update_review_settings(page.id, ReviewMode::Custom, 30, &[], &[reviewer.id], ts("2024-01-01T00:00:00Z"))
            .unwrap();
        let page = pages.require(page.id).unwrap();

        let now = ts("2024-03-01T12:00:00Z");

        // Reviewed 31 days ago: overdue
        logs.append(page.id, reviewer.id, "", now - Duration::days(31))
            .unwrap();
        assert!(is_overdue(&pages, &logs, &page, now).unwrap());

        // Reviewed 29 days ago: not overdue (newer entry wins)
        logs.append(page.id, reviewer.id, "", now - Duration::days(29))
            .unwrap();
        assert!(!is_overdue(&pages, &logs, &page, now).unwrap());
    }

    #[test]
    fn test_overdue_monotonic() {
        // Same config type, earlier due date overdue, later one not
        let now = ts("2024-03-01T00:00:00Z");
        let effective = custom_effective(30);

        let earlier = next_due_date(&effective, Some(now - Duration::days(40))).unwrap();
        let later = next_due_date(&effective, Some(now - Duration::days(10))).unwrap();

        assert!(earlier < now);
        assert!(later > now);
    }

    #[test]
    fn test_never_published_page_not_due() {
        let db = Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);
        let logs = ReviewLogStore::new(&db);

        let page = pages
            .insert(
                &NewPage {
                    title: "Draft",
                    slug: "draft",
                    parent_id: None,
                    virtual_of: None,
                },
                ts("2024-01-01T00:00:00Z"),
            )
            .unwrap();
        pages
            .update_review_settings(page.id, ReviewMode::Custom, 1, &[], &[], ts("2024-01-01T00:00:00Z"))
            .unwrap();
        let page = pages.require(page.id).unwrap();

        assert_eq!(last_review_date(&logs, &page).unwrap(), None);
        assert!(!is_overdue(&pages, &logs, &page, ts("2030-01-01T00:00:00Z")).unwrap());
    }

    #[test]
    fn test_publish_date_fallback() {
        // Root page inheriting the site default (7 days), never reviewed,
        // published 10 days ago: due 3 days ago
        let db = Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);
        let logs = ReviewLogStore::new(&db);

        let now = ts("2024-03-11T00:00:00Z");
        let published = ts("2024-03-01T00:00:00Z");

        let page = pages
            .insert(
                &NewPage {
                    title: "Home",
                    slug: "home",
                    parent_id: None,
                    virtual_of: None,
                },
                published,
            )
            .unwrap();
        pages.publish(page.id, published).unwrap();
        pages.set_site_default(7, &[], &[]).unwrap();
        let page = pages.require(page.id).unwrap();

        assert_eq!(last_review_date(&logs, &page).unwrap(), Some(published));

        let effective = resolver::resolve(&pages, &page).unwrap();
        let due = next_due_date(&effective, Some(published)).unwrap();
        assert_eq!(due, published + Duration::days(7));
        assert!(is_overdue(&pages, &logs, &page, now).unwrap());
    }

    #[test]
    fn test_review_state_draft_url_and_provenance() {
        let db = Database::open_in_memory().unwrap();
        let pages = PageStore::new(&db);
        let members = MemberStore::new(&db);
        let logs = ReviewLogStore::new(&db);

        let t0 = ts("2024-01-01T00:00:00Z");
        let page = pages
            .insert(
                &NewPage {
                    title: "Home",
                    slug: "home",
                    parent_id: None,
                    virtual_of: None,
                },
                t0,
            )
            .unwrap();
        pages.set_site_default(7, &[], &[]).unwrap();
        let page = pages.require(page.id).unwrap();

        let state = review_state(&pages, &members, &logs, &page, t0).unwrap();
        assert_eq!(state.url, "/home?stage=draft");
        assert_eq!(state.settings, SettingsProvenance::InheritedFromSite);
        assert!(!state.is_overdue);

        pages.publish(page.id, t0).unwrap();
        let page = pages.require(page.id).unwrap();
        let state = review_state(&pages, &members, &logs, &page, t0).unwrap();
        assert_eq!(state.url, "/home");
    }
}
