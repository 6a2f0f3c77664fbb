//! Review settings commands, per-page and site-wide.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, SettingsCommands, SiteCommands};
use crate::core::{auth::Authorizer, auth::StoreAuthorizer, schedule};
use crate::error::RevueError;
use crate::model::{GroupId, ReviewMode, UserId};
use crate::storage::{Database, MemberStore, PageStore};

use super::{find_group, find_page, find_user, refresh_display_cache};

/// Execute settings subcommands
///
/// # Errors
///
/// Returns `RevueError::Permission` when the acting user lacks
/// `EDIT_REVIEW_SETTINGS`, and `RevueError::Configuration` when the page's
/// inheritance chain cannot be resolved.
pub fn settings(
    db: &Database,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, RevueError> {
    match cmd {
        SettingsCommands::Set {
            page,
            mode,
            period,
            owner_groups,
            owner_users,
            acting_as,
        } => {
            let pages = PageStore::new(db);
            let members = MemberStore::new(db);
            let now = Utc::now();

            let actor = authorize_editor(&members, &acting_as)?;
            let page = find_page(&pages, &page)?;
            let (group_ids, user_ids) = resolve_owners(&members, &owner_groups, &owner_users)?;

            let mode = ReviewMode::from(mode);
            pages.update_review_settings(page.id, mode, period, &group_ids, &user_ids, now)?;
            refresh_display_cache(&pages, &members, page.id, Some(&actor), now)?;

            match format {
                OutputFormat::Pretty => Ok(format!(
                    "Updated review settings for {} ({}, {})",
                    page.title.bold(),
                    mode,
                    schedule::label_for(period)
                )),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "updated",
                    "page_id": page.id,
                    "mode": mode.as_str(),
                    "review_period_days": period,
                    "owner_groups": group_ids,
                    "owner_users": user_ids
                }))?),
            }
        }
        SettingsCommands::Show { page } => super::page::show(db, &page, format),
    }
}

/// Execute site subcommands
///
/// # Errors
///
/// Returns `RevueError::Permission` when the acting user lacks
/// `EDIT_REVIEW_SETTINGS`.
pub fn site(db: &Database, cmd: SiteCommands, format: OutputFormat) -> Result<String, RevueError> {
    let pages = PageStore::new(db);
    let members = MemberStore::new(db);

    match cmd {
        SiteCommands::Set {
            period,
            owner_groups,
            owner_users,
            acting_as,
        } => {
            authorize_editor(&members, &acting_as)?;
            let (group_ids, user_ids) = resolve_owners(&members, &owner_groups, &owner_users)?;
            pages.set_site_default(period, &group_ids, &user_ids)?;

            match format {
                OutputFormat::Pretty => Ok(format!(
                    "Updated site-wide review default ({})",
                    schedule::label_for(period)
                )),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "status": "updated",
                    "review_period_days": period,
                    "owner_groups": group_ids,
                    "owner_users": user_ids
                }))?),
            }
        }
        SiteCommands::Show => {
            let Some(config) = pages.site_default()? else {
                return match format {
                    OutputFormat::Pretty => {
                        Ok("No site-wide review default is configured".to_string())
                    }
                    OutputFormat::Json => {
                        Ok(serde_json::to_string_pretty(&json!({ "configured": false }))?)
                    }
                };
            };

            let mut names = Vec::new();
            for group_id in &config.owner_groups {
                names.push(members.breadcrumbs(*group_id)?);
            }
            for user_id in &config.owner_users {
                names.push(members.require_user(*user_id)?.name);
            }
            let owners = names.join(", ");

            match format {
                OutputFormat::Pretty => {
                    let mut output = "Site-wide review default\n".to_string();
                    output.push_str(&format!(
                        "  {}: {}\n",
                        "Frequency".dimmed(),
                        schedule::label_for(config.review_period_days)
                    ));
                    let owners = if owners.is_empty() {
                        "(none)".to_string()
                    } else {
                        owners
                    };
                    output.push_str(&format!("  {}: {}\n", "Owners".dimmed(), owners));
                    Ok(output)
                }
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                    "configured": true,
                    "review_period_days": config.review_period_days,
                    "frequency": schedule::label_for(config.review_period_days),
                    "owner_groups": config.owner_groups,
                    "owner_users": config.owner_users,
                    "owner_names": owners
                }))?),
            }
        }
    }
}

/// Resolve the acting user and require the settings-edit permission.
fn authorize_editor(
    members: &MemberStore<'_>,
    acting_as: &str,
) -> Result<crate::model::User, RevueError> {
    let actor = find_user(members, acting_as)?;
    let authorizer = StoreAuthorizer::new(members);
    if !authorizer.can_edit_review_settings(actor.id)? {
        return Err(RevueError::Permission(format!(
            "{} may not edit review settings",
            actor.name
        )));
    }
    Ok(actor)
}

fn resolve_owners(
    members: &MemberStore<'_>,
    owner_groups: &[String],
    owner_users: &[String],
) -> Result<(Vec<GroupId>, Vec<UserId>), RevueError> {
    let mut group_ids = Vec::with_capacity(owner_groups.len());
    for reference in owner_groups {
        group_ids.push(find_group(members, reference)?.id);
    }
    let mut user_ids = Vec::with_capacity(owner_users.len());
    for reference in owner_users {
        user_ids.push(find_user(members, reference)?.id);
    }
    Ok((group_ids, user_ids))
}
