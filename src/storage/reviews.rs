//! Review log storage.
//!
//! The review log is append-only: entries are created when a page is marked
//! reviewed and never updated or deleted.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::error::RevueError;
use crate::model::{PageId, ReviewLogEntry, UserId};

use super::database::OptionalExt;
use super::Database;

/// Storage for review log entries.
pub struct ReviewLogStore<'a> {
    db: &'a Database,
}

impl<'a> ReviewLogStore<'a> {
    /// Create a review log store backed by the given database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Append a review entry for a page.
    ///
    /// Authorization is the caller's responsibility; this only records.
    pub fn append(
        &self,
        page_id: PageId,
        reviewer_id: UserId,
        note: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewLogEntry, RevueError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO review_logs (page_id, reviewer_id, note, created_at)
              VALUES (?1, ?2, ?3, ?4)",
            params![page_id, reviewer_id, note, now.to_rfc3339()],
        )
        .map_err(|e| RevueError::Database(format!("Failed to insert review log: {e}")))?;

        Ok(ReviewLogEntry {
            id: conn.last_insert_rowid(),
            page_id,
            reviewer_id,
            note: note.to_string(),
            created_at: now,
        })
    }

    /// The most recent review entry for a page, if any.
    pub fn latest_for_page(&self, page_id: PageId) -> Result<Option<ReviewLogEntry>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, page_id, reviewer_id, note, created_at
                  FROM review_logs
                  WHERE page_id = ?1
                  ORDER BY created_at DESC, id DESC
                  LIMIT 1",
            )
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([page_id], row_to_entry)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query review log: {e}")))
    }

    /// All review entries for a page, newest first.
    pub fn list_for_page(&self, page_id: PageId) -> Result<Vec<ReviewLogEntry>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, page_id, reviewer_id, note, created_at
                  FROM review_logs
                  WHERE page_id = ?1
                  ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([page_id], row_to_entry)
            .map_err(|e| RevueError::Database(format!("Failed to query review log: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(entries)
    }
}

/// Convert a database row to a ReviewLogEntry.
fn row_to_entry(row: &Row<'_>) -> Result<ReviewLogEntry, rusqlite::Error> {
    let created_at_str: String = row.get(4)?;

    Ok(ReviewLogEntry {
        id: row.get(0)?,
        page_id: row.get(1)?,
        reviewer_id: row.get(2)?,
        note: row.get(3)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.connection()
            .execute_batch(
                "INSERT INTO users (name) VALUES ('alice');
                 INSERT INTO pages (title, slug, updated_at)
                 VALUES ('Home', 'home', '2024-01-01T00:00:00Z');",
            )
            .unwrap();
        db
    }

    #[test]
    fn test_append_and_latest() {
        let db = test_db();
        let logs = ReviewLogStore::new(&db);

        assert!(logs.latest_for_page(1).unwrap().is_none());

        let first: DateTime<Utc> = "2024-01-10T09:00:00Z".parse().unwrap();
        let second: DateTime<Utc> = "2024-02-10T09:00:00Z".parse().unwrap();

        logs.append(1, 1, "initial review", first).unwrap();
        logs.append(1, 1, "follow-up", second).unwrap();

        let latest = logs.latest_for_page(1).unwrap().unwrap();
        assert_eq!(latest.note, "follow-up");
        assert_eq!(latest.created_at, second);
    }

    #[test]
    fn test_list_newest_first() {
        let db = test_db();
        let logs = ReviewLogStore::new(&db);

        let first: DateTime<Utc> = "2024-01-10T09:00:00Z".parse().unwrap();
        let second: DateTime<Utc> = "2024-02-10T09:00:00Z".parse().unwrap();
        logs.append(1, 1, "one", first).unwrap();
        logs.append(1, 1, "two", second).unwrap();

        let entries = logs.list_for_page(1).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note, "two");
        assert_eq!(entries[1].note, "one");
    }
}
