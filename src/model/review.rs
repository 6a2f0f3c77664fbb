//! Review settings, log entries, and the derived review state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GroupId, PageId, ReviewMode, User, UserId};

/// Review settings attached to a page or to the site-wide default.
///
/// The site default never has `Inherit` mode; a page in `Inherit` mode has no
/// authoritative period or owners of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewConfig {
    pub mode: ReviewMode,
    /// 0 means no automatic review date.
    pub review_period_days: u32,
    pub owner_groups: Vec<GroupId>,
    pub owner_users: Vec<UserId>,
}

impl ReviewConfig {
    /// Whether any owner (group or user) is assigned at all.
    #[must_use]
    pub fn has_owners(&self) -> bool {
        !self.owner_groups.is_empty() || !self.owner_users.is_empty()
    }
}

/// An immutable audit entry created when a page is marked reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    pub id: i64,
    pub page_id: PageId,
    pub reviewer_id: UserId,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Where a page's effective settings come from, for display in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingsProvenance {
    /// The page carries its own settings.
    Custom,
    /// Inherited from an ancestor page with custom settings.
    InheritedFromPage { page_id: PageId, title: String },
    /// Inherited from the site-wide default.
    InheritedFromSite,
}

impl std::fmt::Display for SettingsProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom => f.write_str("custom"),
            Self::InheritedFromPage { title, .. } => {
                write!(f, "inherited from \"{title}\"")
            }
            Self::InheritedFromSite => f.write_str("inherited from site settings"),
        }
    }
}

/// Derived review state for a page. Recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReviewState {
    pub page_id: PageId,
    pub title: String,
    /// Public URL; live variant when published, draft variant otherwise.
    pub url: String,
    pub last_review_date: Option<DateTime<Utc>>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub effective_owners: Vec<User>,
    pub owner_names: String,
    pub last_edited_by_name: String,
    pub settings: SettingsProvenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_owners() {
        let mut config = ReviewConfig {
            mode: ReviewMode::Custom,
            review_period_days: 30,
            owner_groups: vec![],
            owner_users: vec![],
        };
        assert!(!config.has_owners());

        config.owner_users.push(1);
        assert!(config.has_owners());

        config.owner_users.clear();
        config.owner_groups.push(2);
        assert!(config.has_owners());
    }

    #[test]
    fn test_provenance_display() {
        assert_eq!(SettingsProvenance::Custom.to_string(), "custom");
        assert_eq!(
            SettingsProvenance::InheritedFromSite.to_string(),
            "inherited from site settings"
        );
        assert_eq!(
            SettingsProvenance::InheritedFromPage {
                page_id: 3,
                title: "About".to_string()
            }
            .to_string(),
            "inherited from \"About\""
        );
    }
}
