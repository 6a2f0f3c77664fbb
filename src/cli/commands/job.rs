//! Job queue commands.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{JobCommands, OutputFormat};
use crate::config::Config;
use crate::error::RevueError;
use crate::jobs::{install_notification_job, queued_jobs, InstallOutcome};
use crate::output;
use crate::storage::Database;

/// Execute job subcommands
///
/// # Errors
///
/// Returns `RevueError::Config` for an out-of-range run hour, or a database
/// error if the queue cannot be read or written.
pub fn job(
    db: &Database,
    cmd: JobCommands,
    config: &Config,
    format: OutputFormat,
) -> Result<String, RevueError> {
    match cmd {
        JobCommands::Install => {
            let outcome = install_notification_job(db, config.jobs.first_run_hour, Utc::now())?;
            match format {
                OutputFormat::Pretty => Ok(match outcome {
                    InstallOutcome::Installed(job) => format!(
                        "Queued {} to run {}",
                        job.kind.bold(),
                        job.run_at.format("%Y-%m-%d %H:%M")
                    ),
                    InstallOutcome::AlreadyQueued(job) => format!(
                        "Job {} is already queued to run {}",
                        job.kind.bold(),
                        job.run_at.format("%Y-%m-%d %H:%M")
                    ),
                }),
                OutputFormat::Json => {
                    let (status, job) = match outcome {
                        InstallOutcome::Installed(job) => ("installed", job),
                        InstallOutcome::AlreadyQueued(job) => ("already-queued", job),
                    };
                    Ok(serde_json::to_string_pretty(&json!({
                        "status": status,
                        "job": job
                    }))?)
                }
            }
        }
        JobCommands::List => output::format_jobs(&queued_jobs(db)?, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let config = Config::default();

        let out = job(&db, JobCommands::Install, &config, OutputFormat::Pretty).unwrap();
        assert!(out.contains("Queued"));

        let out = job(&db, JobCommands::Install, &config, OutputFormat::Pretty).unwrap();
        assert!(out.contains("already queued"));

        let out = job(&db, JobCommands::List, &config, OutputFormat::Pretty).unwrap();
        assert!(out.contains("Queued jobs (1)"));
    }

    #[test]
    fn test_install_rejects_bad_hour() {
        let db = Database::open_in_memory().unwrap();
        let mut config = Config::default();
        config.jobs.first_run_hour = 24;

        let err = job(&db, JobCommands::Install, &config, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, RevueError::Config(_)));
    }
}
