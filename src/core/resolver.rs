//! Review-settings inheritance resolution.
//!
//! A page either carries its own settings (`Custom`), opts out (`Disabled`),
//! or inherits from the nearest ancestor with a decision, falling back to the
//! site-wide default at the root.

use crate::error::RevueError;
use crate::model::{Page, ReviewConfig, ReviewMode, SettingsProvenance, MAX_TREE_DEPTH};
use crate::storage::PageStore;

/// The resolved, non-inherited settings that actually govern a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveSettings {
    /// Review tracking is off for this page.
    Disabled,
    /// Settings come from a page with `Custom` mode (the page itself or an
    /// ancestor).
    Custom { source: Page, config: ReviewConfig },
    /// Settings come from the site-wide default.
    SiteDefault { config: ReviewConfig },
}

impl EffectiveSettings {
    /// The governing config, unless review tracking is disabled.
    #[must_use]
    pub const fn config(&self) -> Option<&ReviewConfig> {
        match self {
            Self::Disabled => None,
            Self::Custom { config, .. } | Self::SiteDefault { config } => Some(config),
        }
    }

    /// Where the settings came from, relative to the page they were resolved
    /// for.
    #[must_use]
    pub fn provenance(&self, page: &Page) -> SettingsProvenance {
        match self {
            Self::Custom { source, .. } if source.id == page.id => SettingsProvenance::Custom,
            Self::Custom { source, .. } => SettingsProvenance::InheritedFromPage {
                page_id: source.id,
                title: source.title.clone(),
            },
            // Disabled pages never reach the report; call it site-inherited
            Self::Disabled | Self::SiteDefault { .. } => SettingsProvenance::InheritedFromSite,
        }
    }
}

/// Resolve the effective review settings for a page.
///
/// Walks strictly upward through parents: the first ancestor with `Custom`
/// supplies the settings, `Disabled` anywhere on the way wins as the
/// sentinel, and a root still in `Inherit` mode falls back to the site-wide
/// default.
///
/// # Errors
///
/// Returns `RevueError::Configuration` if no site-wide default is configured
/// when one is needed, or if the parent chain exceeds [`MAX_TREE_DEPTH`]
/// (a cyclic hierarchy).
pub fn resolve(pages: &PageStore<'_>, page: &Page) -> Result<EffectiveSettings, RevueError> {
    match page.review_mode {
        ReviewMode::Custom => {
            return Ok(EffectiveSettings::Custom {
                source: page.clone(),
                config: pages.review_config(page.id)?,
            });
        }
        ReviewMode::Disabled => return Ok(EffectiveSettings::Disabled),
        ReviewMode::Inherit => {}
    }

    let mut current = page.parent_id;

    for _ in 0..MAX_TREE_DEPTH {
        let Some(parent_id) = current else {
            // Root page still inheriting: use the site config
            return site_default(pages, page);
        };

        let parent = pages.require(parent_id)?;
        match parent.review_mode {
            ReviewMode::Custom => {
                let config = pages.review_config(parent.id)?;
                return Ok(EffectiveSettings::Custom {
                    source: parent,
                    config,
                });
            }
            ReviewMode::Disabled => return Ok(EffectiveSettings::Disabled),
            ReviewMode::Inherit => current = parent.parent_id,
        }
    }

    Err(RevueError::Configuration(format!(
        "ancestor chain of \"{}\" exceeds depth {MAX_TREE_DEPTH}; cycle suspected",
        page.title
    )))
}

fn site_default(pages: &PageStore<'_>, page: &Page) -> Result<EffectiveSettings, RevueError> {
    pages.site_default()?.map_or_else(
        || {
            Err(RevueError::Configuration(format!(
                "\"{}\" inherits from the site-wide default, but none is configured",
                page.title
            )))
        },
        |config| Ok(EffectiveSettings::SiteDefault { config }),
    )
}
