//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.revue/revue.db` and contains tables for:
//! - Pages, review settings, and the site-wide default
//! - Users, groups, and memberships
//! - Review log entries
//! - The notification job queue
//!
//! Note: `revue.db` is the `SQLite` database file.

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::RevueError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, RevueError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, RevueError> {
        let conn = Connection::open(path).map_err(|e| {
            RevueError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| RevueError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, RevueError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            RevueError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| RevueError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), RevueError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, RevueError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    ///
    /// This is primarily for use by store modules that need direct access.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Map `QueryReturnedNoRows` to `None` instead of an error.
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
