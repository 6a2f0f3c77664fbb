//! Database migrations for revue.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::RevueError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, RevueError> {
    // Try to read from user_version pragma
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| RevueError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), RevueError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| RevueError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), RevueError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    // Run migrations in order
    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), RevueError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(RevueError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `pages`: The page tree with per-page review settings
/// - `users`, `member_groups`, `group_members`, `group_permissions`: Members
/// - `page_owner_groups`, `page_owner_users`: Per-page owner relations
/// - `site_settings`, `site_owner_groups`, `site_owner_users`: Site default
/// - `review_logs`: Append-only review audit trail
/// - `job_queue`: Queued notification jobs
fn migrate_v1(conn: &Connection) -> Result<(), RevueError> {
    conn.execute_batch(
        r"
        -- Page tree with review settings and denormalized display caches
        CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER REFERENCES pages(id),
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            page_type TEXT NOT NULL DEFAULT 'standard',
            virtual_of INTEGER REFERENCES pages(id),
            review_mode TEXT NOT NULL DEFAULT 'inherit',
            review_period_days INTEGER NOT NULL DEFAULT 0,
            owner_names TEXT NOT NULL DEFAULT '',
            last_edited_by_name TEXT NOT NULL DEFAULT '',
            last_edited_by INTEGER REFERENCES users(id),
            updated_at TEXT NOT NULL,
            published_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_pages_parent ON pages(parent_id);

        -- Members
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            email TEXT
        );

        CREATE TABLE IF NOT EXISTS member_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER REFERENCES member_groups(id),
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS group_members (
            group_id INTEGER NOT NULL REFERENCES member_groups(id),
            user_id INTEGER NOT NULL REFERENCES users(id),
            PRIMARY KEY (group_id, user_id)
        );

        CREATE TABLE IF NOT EXISTS group_permissions (
            group_id INTEGER NOT NULL REFERENCES member_groups(id),
            code TEXT NOT NULL,
            PRIMARY KEY (group_id, code)
        );

        -- Per-page owner relations
        CREATE TABLE IF NOT EXISTS page_owner_groups (
            page_id INTEGER NOT NULL REFERENCES pages(id),
            group_id INTEGER NOT NULL REFERENCES member_groups(id),
            PRIMARY KEY (page_id, group_id)
        );

        CREATE TABLE IF NOT EXISTS page_owner_users (
            page_id INTEGER NOT NULL REFERENCES pages(id),
            user_id INTEGER NOT NULL REFERENCES users(id),
            PRIMARY KEY (page_id, user_id)
        );

        -- Site-wide review default (single row, id = 1)
        CREATE TABLE IF NOT EXISTS site_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            review_period_days INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS site_owner_groups (
            group_id INTEGER PRIMARY KEY REFERENCES member_groups(id)
        );

        CREATE TABLE IF NOT EXISTS site_owner_users (
            user_id INTEGER PRIMARY KEY REFERENCES users(id)
        );

        -- Review audit trail; rows are never updated or deleted
        CREATE TABLE IF NOT EXISTS review_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL REFERENCES pages(id),
            reviewer_id INTEGER NOT NULL REFERENCES users(id),
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_review_logs_page
        ON review_logs(page_id, created_at);

        -- Queued notification jobs
        CREATE TABLE IF NOT EXISTS job_queue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            run_at TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_job_queue_status
        ON job_queue(kind, status);
        ",
    )
    .map_err(|e| RevueError::Database(format!("Migration v1 failed: {e}")))
}
