//! Page records and review-mode settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PageId, UserId};

/// How a page sources its review settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Use the nearest ancestor's settings, falling back to the site default.
    #[default]
    Inherit,
    /// No review tracking for this page or anything inheriting from it.
    Disabled,
    /// This page carries its own period and owners.
    Custom,
}

impl ReviewMode {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Disabled => "disabled",
            Self::Custom => "custom",
        }
    }

    /// Parse the database representation; unknown values fall back to Inherit.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "disabled" => Self::Disabled,
            "custom" => Self::Custom,
            _ => Self::Inherit,
        }
    }
}

impl std::fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a page holds its own content or mirrors another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// Ordinary content page.
    #[default]
    Standard,
    /// Alias page that mirrors another page's content.
    Virtual,
}

impl PageType {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Virtual => "virtual",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "virtual" => Self::Virtual,
            _ => Self::Standard,
        }
    }
}

/// A CMS page row.
///
/// `owner_names` and `last_edited_by_name` are denormalized display caches
/// refreshed whenever tracked fields change; the owner relations and review
/// log are the sources of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub parent_id: Option<PageId>,
    pub title: String,
    pub slug: String,
    pub page_type: PageType,
    /// For virtual pages, the page being mirrored.
    pub virtual_of: Option<PageId>,
    pub review_mode: ReviewMode,
    /// 0 means no automatic review date.
    pub review_period_days: u32,
    pub owner_names: String,
    pub last_edited_by_name: String,
    pub last_edited_by: Option<UserId>,
    /// Draft modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Timestamp of the live version; `None` means never published.
    pub published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Whether a live version of this page exists.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}
