use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::model::ReviewMode;

#[derive(Parser)]
#[command(name = "revue")]
#[command(about = "Track content review schedules for a page-based CMS")]
#[command(long_about = "revue - a content review tracker

Pages (or the site-wide default) are assigned content owners and a review
interval; revue computes when each page is next due for review, reports
overdue pages, and lets an authorized owner mark a page reviewed.

QUICK START:
  revue page add \"Home\"                         Create a page
  revue page publish home                        Publish the live version
  revue site set --period 30 --as admin          Site-wide default: monthly
  revue report                                   Show overdue pages
  revue review home --as alice                   Mark a page reviewed

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  revue <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// Falls back to the configured default when omitted.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file to use (defaults to ~/.revue/revue.db)
    #[arg(long, global = true, env = "REVUE_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage pages (add, list, show, publish)
    ///
    /// Pages form a single-parent tree. New pages start as drafts in
    /// 'inherit' review mode; only published pages are considered by the
    /// review report.
    #[command(alias = "p")]
    Page(PageArgs),

    /// Manage users
    User(UserArgs),

    /// Manage groups, group membership, and permissions
    ///
    /// Groups form their own hierarchy: assigning a group as a content
    /// owner includes every descendant sub-group's members.
    Group(GroupArgs),

    /// Edit or inspect a page's review settings
    ///
    /// # Examples
    ///
    ///   revue settings set home --mode custom --period 30 \
    ///       --owner-group editors --as admin
    ///   revue settings set docs --mode inherit --as admin
    ///   revue settings show docs
    ///
    /// Editing requires the EDIT_REVIEW_SETTINGS (or ADMIN) permission.
    /// 'show' displays the resolved effective settings: what actually
    /// governs the page after walking the inheritance chain.
    Settings(SettingsArgs),

    /// Edit or inspect the site-wide review default
    ///
    /// Root pages in 'inherit' mode fall back to these settings. A period
    /// of 0 means no automatic review date.
    Site(SiteArgs),

    /// Mark a page as reviewed
    ///
    /// Appends an immutable entry to the page's review log and resets the
    /// review clock. Only content owners of the page (directly, or through
    /// an owner group and its sub-groups) may review it.
    ///
    /// # Examples
    ///
    ///   revue review home --as alice
    ///   revue review home --as alice --note "checked pricing table"
    #[command(alias = "r")]
    Review(ReviewArgs),

    /// Show all pages currently overdue for review
    ///
    /// Only live (published) content is evaluated; draft-only edits never
    /// trigger review. Virtual pages are hidden unless requested.
    ///
    /// # Examples
    ///
    ///   revue report
    ///   revue report --include-virtual
    ///   revue report --mine alice
    Report(ReportArgs),

    /// Print the review frequency schedule
    Schedule,

    /// Manage the review notification job
    Job(JobArgs),
}

#[derive(Args)]
pub struct PageArgs {
    #[command(subcommand)]
    pub command: PageCommands,
}

#[derive(Subcommand)]
pub enum PageCommands {
    /// Add a new page
    Add {
        /// Page title
        title: String,
        /// URL slug (defaults to a slugified title)
        #[arg(long)]
        slug: Option<String>,
        /// Parent page (slug or ID)
        #[arg(long)]
        parent: Option<String>,
        /// Create a virtual page mirroring this page (slug or ID)
        #[arg(long)]
        virtual_of: Option<String>,
        /// Acting user (name or ID), recorded as the editor
        #[arg(long = "as")]
        acting_as: Option<String>,
    },
    /// List all pages
    List,
    /// Show a page's review log
    Show {
        /// Page (slug or ID)
        page: String,
    },
    /// Publish a page, making the current draft the live version
    Publish {
        /// Page (slug or ID)
        page: String,
        /// Acting user (name or ID), recorded as the editor
        #[arg(long = "as")]
        acting_as: Option<String>,
    },
}

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a new user
    Add {
        /// User name (must be unique)
        name: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
    /// List all users
    List,
}

#[derive(Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommands,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Add a new group
    Add {
        /// Group name (must be unique)
        name: String,
        /// Parent group (name or ID)
        #[arg(long)]
        parent: Option<String>,
    },
    /// List all groups
    List,
    /// Add a user to a group
    AddMember {
        /// Group (name or ID)
        group: String,
        /// User (name or ID)
        user: String,
    },
    /// Grant a permission code to a group
    ///
    /// Recognized codes: ADMIN, EDIT_REVIEW_SETTINGS, CMS_ACCESS.
    Grant {
        /// Group (name or ID)
        group: String,
        /// Permission code
        code: String,
    },
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Set a page's review settings
    Set {
        /// Page (slug or ID)
        page: String,
        /// Review mode
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Review interval in days (0 = no automatic date)
        #[arg(long, default_value_t = 0)]
        period: u32,
        /// Owner group (name or ID); may be repeated
        #[arg(long = "owner-group")]
        owner_groups: Vec<String>,
        /// Owner user (name or ID); may be repeated
        #[arg(long = "owner-user")]
        owner_users: Vec<String>,
        /// Acting user (name or ID); must hold EDIT_REVIEW_SETTINGS
        #[arg(long = "as")]
        acting_as: String,
    },
    /// Show a page's effective review settings
    Show {
        /// Page (slug or ID)
        page: String,
    },
}

#[derive(Args)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub command: SiteCommands,
}

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Set the site-wide default review settings
    Set {
        /// Review interval in days (0 = no automatic date)
        #[arg(long)]
        period: u32,
        /// Owner group (name or ID); may be repeated
        #[arg(long = "owner-group")]
        owner_groups: Vec<String>,
        /// Owner user (name or ID); may be repeated
        #[arg(long = "owner-user")]
        owner_users: Vec<String>,
        /// Acting user (name or ID); must hold EDIT_REVIEW_SETTINGS
        #[arg(long = "as")]
        acting_as: String,
    },
    /// Show the site-wide default review settings
    Show,
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Page (slug or ID)
    pub page: String,
    /// Reviewing user (name or ID); must be a content owner
    #[arg(long = "as")]
    pub acting_as: String,
    /// Optional review note
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Include virtual (alias) pages
    #[arg(long)]
    pub include_virtual: bool,
    /// Only show pages owned by this user (name or ID)
    #[arg(long)]
    pub mine: Option<String>,
}

#[derive(Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommands,
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// Queue the review notification job for tomorrow
    ///
    /// Idempotent: if a pending job is already queued, nothing changes.
    Install,
    /// List queued jobs
    List,
}

/// Review mode as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    /// Inherit settings from the parent page (or the site default)
    Inherit,
    /// Disable review tracking
    Disabled,
    /// Use this page's own period and owners
    Custom,
}

impl From<ModeArg> for ReviewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Inherit => Self::Inherit,
            ModeArg::Disabled => Self::Disabled,
            ModeArg::Custom => Self::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(ReviewMode::from(ModeArg::Custom), ReviewMode::Custom);
        assert_eq!(ReviewMode::from(ModeArg::Inherit), ReviewMode::Inherit);
        assert_eq!(ReviewMode::from(ModeArg::Disabled), ReviewMode::Disabled);
    }
}
