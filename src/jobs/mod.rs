//! Notification job registration.
//!
//! On first install the recurring review-notification job is queued for the
//! configured hour the following day. Registration is idempotent: an already
//! queued pending job is detected and left alone.

use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::error::RevueError;
use crate::storage::Database;

/// Job kind for the recurring review notification run.
pub const NOTIFICATION_JOB: &str = "review-notification";

/// A row in the job queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedJob {
    pub id: i64,
    pub kind: String,
    pub run_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a job installation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A new job was queued for the given time.
    Installed(QueuedJob),
    /// A pending job already existed; nothing was queued.
    AlreadyQueued(QueuedJob),
}

/// Queue the review-notification job for `first_run_hour` (UTC) tomorrow.
///
/// # Errors
///
/// Returns `RevueError::Config` for an out-of-range hour, or a database error
/// if the queue cannot be read or written.
pub fn install_notification_job(
    db: &Database,
    first_run_hour: u32,
    now: DateTime<Utc>,
) -> Result<InstallOutcome, RevueError> {
    if first_run_hour > 23 {
        return Err(RevueError::Config(format!(
            "first run hour must be 0-23, got {first_run_hour}"
        )));
    }

    if let Some(existing) = pending_job(db, NOTIFICATION_JOB)? {
        return Ok(InstallOutcome::AlreadyQueued(existing));
    }

    let run_at = (now + chrono::Duration::days(1))
        .date_naive()
        .and_hms_opt(first_run_hour, 0, 0)
        .ok_or_else(|| RevueError::Config(format!("invalid run hour {first_run_hour}")))?
        .and_utc();

    let conn = db.connection();
    conn.execute(
        "INSERT INTO job_queue (kind, run_at, status, created_at)
         VALUES (?1, ?2, 'pending', ?3)",
        params![NOTIFICATION_JOB, run_at.to_rfc3339(), now.to_rfc3339()],
    )
    .map_err(|e| RevueError::Database(format!("Failed to queue job: {e}")))?;

    info!("queued {NOTIFICATION_JOB} to run at {run_at}");

    let job = QueuedJob {
        id: conn.last_insert_rowid(),
        kind: NOTIFICATION_JOB.to_string(),
        run_at,
        status: "pending".to_string(),
        created_at: now,
    };
    Ok(InstallOutcome::Installed(job))
}

/// All jobs in the queue, oldest first.
pub fn queued_jobs(db: &Database) -> Result<Vec<QueuedJob>, RevueError> {
    let conn = db.connection();

    let mut stmt = conn
        .prepare(
            "SELECT id, kind, run_at, status, created_at FROM job_queue ORDER BY id",
        )
        .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map([], row_to_job)
        .map_err(|e| RevueError::Database(format!("Failed to query jobs: {e}")))?;

    let mut jobs = Vec::new();
    for row in rows {
        jobs.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
    }
    Ok(jobs)
}

fn pending_job(db: &Database, kind: &str) -> Result<Option<QueuedJob>, RevueError> {
    use crate::storage::OptionalExt;

    let conn = db.connection();

    let mut stmt = conn
        .prepare(
            "SELECT id, kind, run_at, status, created_at FROM job_queue
             WHERE kind = ?1 AND status = 'pending' LIMIT 1",
        )
        .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

    stmt.query_row([kind], row_to_job)
        .optional()
        .map_err(|e| RevueError::Database(format!("Failed to query jobs: {e}")))
}

fn row_to_job(row: &Row<'_>) -> Result<QueuedJob, rusqlite::Error> {
    let run_at_str: String = row.get(2)?;
    let created_at_str: String = row.get(4)?;

    let parse = |s: &str| {
        DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    };

    Ok(QueuedJob {
        id: row.get(0)?,
        kind: row.get(1)?,
        run_at: parse(&run_at_str),
        status: row.get(3)?,
        created_at: parse(&created_at_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_install_queues_for_next_day() {
        let db = Database::open_in_memory().unwrap();
        let now = ts("2024-06-01T15:30:00Z");

        let outcome = install_notification_job(&db, 9, now).unwrap();
        match outcome {
            InstallOutcome::Installed(job) => {
                assert_eq!(job.run_at, ts("2024-06-02T09:00:00Z"));
                assert_eq!(job.kind, NOTIFICATION_JOB);
                assert_eq!(job.status, "pending");
            }
            InstallOutcome::AlreadyQueued(_) => panic!("expected a fresh install"),
        }
    }

    #[test]
    fn test_install_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let now = ts("2024-06-01T15:30:00Z");

        let first = install_notification_job(&db, 9, now).unwrap();
        let second = install_notification_job(&db, 9, now + chrono::Duration::hours(1)).unwrap();

        let InstallOutcome::Installed(job) = first else {
            panic!("expected install");
        };
        assert_eq!(second, InstallOutcome::AlreadyQueued(job));
        assert_eq!(queued_jobs(&db).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let db = Database::open_in_memory().unwrap();
        let err = install_notification_job(&db, 24, Utc::now()).unwrap_err();
        assert!(matches!(err, RevueError::Config(_)));
    }
}
