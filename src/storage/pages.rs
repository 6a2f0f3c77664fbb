//! Page tree storage.
//!
//! Persists pages, their review settings, the per-page owner relations, and
//! the site-wide review default.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::error::RevueError;
use crate::model::{
    GroupId, Page, PageId, PageType, ReviewConfig, ReviewMode, UserId, MAX_TREE_DEPTH,
};

use super::database::OptionalExt;
use super::Database;

/// Storage for pages and review settings.
pub struct PageStore<'a> {
    db: &'a Database,
}

/// Fields for creating a new page.
pub struct NewPage<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub parent_id: Option<PageId>,
    /// Makes this a virtual page mirroring the given page.
    pub virtual_of: Option<PageId>,
}

impl<'a> PageStore<'a> {
    /// Create a page store backed by the given database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new page. New pages start in `Inherit` mode, unpublished.
    pub fn insert(&self, new: &NewPage<'_>, now: DateTime<Utc>) -> Result<Page, RevueError> {
        if let Some(parent_id) = new.parent_id {
            self.require(parent_id)?;
        }
        let page_type = if new.virtual_of.is_some() {
            PageType::Virtual
        } else {
            PageType::Standard
        };
        if let Some(target) = new.virtual_of {
            self.require(target)?;
        }

        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO pages (parent_id, title, slug, page_type, virtual_of, updated_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.parent_id,
                new.title,
                new.slug,
                page_type.as_str(),
                new.virtual_of,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| RevueError::Database(format!("Failed to insert page: {e}")))?;

        self.require(conn.last_insert_rowid())
    }

    /// Get a page by ID.
    pub fn get(&self, id: PageId) -> Result<Option<Page>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{PAGE_SELECT} WHERE id = ?1"))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let result = stmt
            .query_row([id], row_to_page)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query page: {e}")))?;

        Ok(result)
    }

    /// Get a page by slug.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Page>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{PAGE_SELECT} WHERE slug = ?1"))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let result = stmt
            .query_row([slug], row_to_page)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query page: {e}")))?;

        Ok(result)
    }

    /// Get a page by ID, failing if it does not exist.
    pub fn require(&self, id: PageId) -> Result<Page, RevueError> {
        self.get(id)?
            .ok_or_else(|| RevueError::NotFound(format!("page {id}")))
    }

    /// List all pages, parents before children where possible.
    pub fn list(&self) -> Result<Vec<Page>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{PAGE_SELECT} ORDER BY parent_id IS NOT NULL, parent_id, id"
            ))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_page)
            .map_err(|e| RevueError::Database(format!("Failed to query pages: {e}")))?;

        let mut pages = Vec::new();
        for row in rows {
            pages.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }

        Ok(pages)
    }

    /// IDs of all pages with a live (published) version.
    ///
    /// The review report only ever evaluates live content.
    pub fn live_page_ids(&self) -> Result<Vec<PageId>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id FROM pages WHERE published_at IS NOT NULL ORDER BY id")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| RevueError::Database(format!("Failed to query pages: {e}")))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }

        Ok(ids)
    }

    /// Mark the current draft as published, making it the live version.
    pub fn publish(&self, id: PageId, now: DateTime<Utc>) -> Result<(), RevueError> {
        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE pages SET published_at = ?1 WHERE id = ?2",
                params![now.to_rfc3339(), id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to publish page: {e}")))?;

        if changed == 0 {
            return Err(RevueError::NotFound(format!("page {id}")));
        }
        Ok(())
    }

    /// Replace a page's review settings and owner relations.
    pub fn update_review_settings(
        &self,
        id: PageId,
        mode: ReviewMode,
        review_period_days: u32,
        owner_groups: &[GroupId],
        owner_users: &[UserId],
        now: DateTime<Utc>,
    ) -> Result<(), RevueError> {
        self.require(id)?;
        let conn = self.db.connection();

        conn.execute(
            r"UPDATE pages SET review_mode = ?1, review_period_days = ?2, updated_at = ?3
              WHERE id = ?4",
            params![mode.as_str(), review_period_days, now.to_rfc3339(), id],
        )
        .map_err(|e| RevueError::Database(format!("Failed to update settings: {e}")))?;

        conn.execute("DELETE FROM page_owner_groups WHERE page_id = ?1", [id])
            .map_err(|e| RevueError::Database(format!("Failed to clear owner groups: {e}")))?;
        conn.execute("DELETE FROM page_owner_users WHERE page_id = ?1", [id])
            .map_err(|e| RevueError::Database(format!("Failed to clear owner users: {e}")))?;

        for group_id in owner_groups {
            conn.execute(
                "INSERT OR IGNORE INTO page_owner_groups (page_id, group_id) VALUES (?1, ?2)",
                params![id, group_id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to add owner group: {e}")))?;
        }
        for user_id in owner_users {
            conn.execute(
                "INSERT OR IGNORE INTO page_owner_users (page_id, user_id) VALUES (?1, ?2)",
                params![id, user_id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to add owner user: {e}")))?;
        }

        Ok(())
    }

    /// Load a page's own review settings, including owner relations.
    pub fn review_config(&self, id: PageId) -> Result<ReviewConfig, RevueError> {
        let page = self.require(id)?;

        Ok(ReviewConfig {
            mode: page.review_mode,
            review_period_days: page.review_period_days,
            owner_groups: self.relation_ids("page_owner_groups", "group_id", id)?,
            owner_users: self.relation_ids("page_owner_users", "user_id", id)?,
        })
    }

    /// Load the site-wide default settings, if configured.
    ///
    /// The site default is never `Inherit`; it behaves as custom settings
    /// applied to every root page that inherits.
    pub fn site_default(&self) -> Result<Option<ReviewConfig>, RevueError> {
        let conn = self.db.connection();

        let period: Option<u32> = conn
            .query_row(
                "SELECT review_period_days FROM site_settings WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query site settings: {e}")))?;

        let Some(review_period_days) = period else {
            return Ok(None);
        };

        Ok(Some(ReviewConfig {
            mode: ReviewMode::Custom,
            review_period_days,
            owner_groups: self.site_relation_ids("site_owner_groups", "group_id")?,
            owner_users: self.site_relation_ids("site_owner_users", "user_id")?,
        }))
    }

    /// Replace the site-wide default settings.
    pub fn set_site_default(
        &self,
        review_period_days: u32,
        owner_groups: &[GroupId],
        owner_users: &[UserId],
    ) -> Result<(), RevueError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO site_settings (id, review_period_days) VALUES (1, ?1)
              ON CONFLICT(id) DO UPDATE SET review_period_days = ?1",
            params![review_period_days],
        )
        .map_err(|e| RevueError::Database(format!("Failed to set site settings: {e}")))?;

        conn.execute("DELETE FROM site_owner_groups", [])
            .map_err(|e| RevueError::Database(format!("Failed to clear site owners: {e}")))?;
        conn.execute("DELETE FROM site_owner_users", [])
            .map_err(|e| RevueError::Database(format!("Failed to clear site owners: {e}")))?;

        for group_id in owner_groups {
            conn.execute(
                "INSERT OR IGNORE INTO site_owner_groups (group_id) VALUES (?1)",
                [group_id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to add site owner group: {e}")))?;
        }
        for user_id in owner_users {
            conn.execute(
                "INSERT OR IGNORE INTO site_owner_users (user_id) VALUES (?1)",
                [user_id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to add site owner user: {e}")))?;
        }

        Ok(())
    }

    /// Refresh the denormalized display caches on a page row.
    pub fn set_display_cache(
        &self,
        id: PageId,
        owner_names: &str,
        editor: Option<(&str, UserId)>,
        now: DateTime<Utc>,
    ) -> Result<(), RevueError> {
        let conn = self.db.connection();

        match editor {
            Some((name, user_id)) => conn.execute(
                r"UPDATE pages SET owner_names = ?1, last_edited_by_name = ?2,
                  last_edited_by = ?3, updated_at = ?4 WHERE id = ?5",
                params![owner_names, name, user_id, now.to_rfc3339(), id],
            ),
            None => conn.execute(
                "UPDATE pages SET owner_names = ?1, updated_at = ?2 WHERE id = ?3",
                params![owner_names, now.to_rfc3339(), id],
            ),
        }
        .map_err(|e| RevueError::Database(format!("Failed to update display cache: {e}")))?;

        Ok(())
    }

    /// Public URL path of a page: slugs from the root down, `/`-joined.
    ///
    /// # Errors
    ///
    /// Returns `RevueError::Configuration` if the parent chain exceeds
    /// [`MAX_TREE_DEPTH`], which indicates a cycle.
    pub fn path(&self, page: &Page) -> Result<String, RevueError> {
        let mut slugs = vec![page.slug.clone()];
        let mut current = page.parent_id;

        for _ in 0..MAX_TREE_DEPTH {
            let Some(id) = current else {
                slugs.reverse();
                return Ok(format!("/{}", slugs.join("/")));
            };
            let parent = self.require(id)?;
            slugs.push(parent.slug.clone());
            current = parent.parent_id;
        }

        Err(RevueError::Configuration(format!(
            "page hierarchy for \"{}\" exceeds depth {MAX_TREE_DEPTH}; cycle suspected",
            page.title
        )))
    }

    fn relation_ids(
        &self,
        table: &str,
        column: &str,
        page_id: PageId,
    ) -> Result<Vec<i64>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {column} FROM {table} WHERE page_id = ?1 ORDER BY {column}"
            ))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([page_id], |row| row.get(0))
            .map_err(|e| RevueError::Database(format!("Failed to query owners: {e}")))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(ids)
    }

    fn site_relation_ids(&self, table: &str, column: &str) -> Result<Vec<i64>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("SELECT {column} FROM {table} ORDER BY {column}"))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| RevueError::Database(format!("Failed to query owners: {e}")))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(ids)
    }
}

const PAGE_SELECT: &str = r"SELECT id, parent_id, title, slug, page_type, virtual_of,
       review_mode, review_period_days, owner_names, last_edited_by_name,
       last_edited_by, updated_at, published_at
  FROM pages";

/// Convert a database row to a Page.
fn row_to_page(row: &Row<'_>) -> Result<Page, rusqlite::Error> {
    let page_type_str: String = row.get(4)?;
    let review_mode_str: String = row.get(6)?;
    let updated_at_str: String = row.get(11)?;
    let published_at_str: Option<String> = row.get(12)?;

    Ok(Page {
        id: row.get(0)?,
        parent_id: row.get(1)?,
        title: row.get(2)?,
        slug: row.get(3)?,
        page_type: PageType::from_str(&page_type_str),
        virtual_of: row.get(5)?,
        review_mode: ReviewMode::from_str(&review_mode_str),
        review_period_days: row.get(7)?,
        owner_names: row.get(8)?,
        last_edited_by_name: row.get(9)?,
        last_edited_by: row.get(10)?,
        updated_at: parse_timestamp(&updated_at_str),
        published_at: published_at_str.as_deref().map(parse_timestamp),
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
