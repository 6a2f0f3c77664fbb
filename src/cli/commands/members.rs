//! User and group commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{GroupCommands, OutputFormat, UserCommands};
use crate::core::auth;
use crate::error::RevueError;
use crate::output;
use crate::storage::{Database, MemberStore};

use super::{find_group, find_user};

/// Execute user subcommands
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn user(db: &Database, cmd: UserCommands, format: OutputFormat) -> Result<String, RevueError> {
    let members = MemberStore::new(db);

    match cmd {
        UserCommands::Add { name, email } => {
            let user = members.add_user(&name, email.as_deref())?;
            match format {
                OutputFormat::Pretty => Ok(format!("Added user {}", user.name.bold())),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "added",
                    "user": user
                }))?),
            }
        }
        UserCommands::List => output::format_users(&members.list_users()?, format),
    }
}

/// Execute group subcommands
///
/// # Errors
///
/// Returns an error if a referenced group or user cannot be found, the
/// permission code is unknown, or the database operation fails.
pub fn group(
    db: &Database,
    cmd: GroupCommands,
    format: OutputFormat,
) -> Result<String, RevueError> {
    let members = MemberStore::new(db);

    match cmd {
        GroupCommands::Add { name, parent } => {
            let parent_id = parent
                .as_deref()
                .map(|p| find_group(&members, p))
                .transpose()?
                .map(|g| g.id);
            let group = members.add_group(&name, parent_id)?;
            match format {
                OutputFormat::Pretty => Ok(format!("Added group {}", group.name.bold())),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "added",
                    "group": group
                }))?),
            }
        }
        GroupCommands::List => output::format_groups(&members.list_groups()?, format),
        GroupCommands::AddMember { group, user } => {
            let group = find_group(&members, &group)?;
            let user = find_user(&members, &user)?;
            members.add_member(group.id, user.id)?;
            match format {
                OutputFormat::Pretty => Ok(format!(
                    "Added {} to {}",
                    user.name.bold(),
                    group.name.bold()
                )),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "member-added",
                    "group": group,
                    "user": user
                }))?),
            }
        }
        GroupCommands::Grant { group, code } => {
            let code = code.to_uppercase();
            if ![auth::ADMIN, auth::EDIT_REVIEW_SETTINGS, auth::CMS_ACCESS].contains(&code.as_str())
            {
                return Err(RevueError::Config(format!("unknown permission code '{code}'")));
            }

            let group = find_group(&members, &group)?;
            members.grant(group.id, &code)?;
            match format {
                OutputFormat::Pretty => {
                    Ok(format!("Granted {} to {}", code.bold(), group.name.bold()))
                }
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "granted",
                    "group": group,
                    "code": code
                }))?),
            }
        }
    }
}
