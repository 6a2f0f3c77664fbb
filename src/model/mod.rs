//! Domain model for revue.
//!
//! Plain data types shared by the storage, core, and output layers.

mod member;
mod page;
mod review;

pub use member::{Group, User};
pub use page::{Page, PageType, ReviewMode};
pub use review::{PageReviewState, ReviewConfig, ReviewLogEntry, SettingsProvenance};

/// Upper bound on hierarchy walks. A well-formed tree never gets close;
/// hitting it means a cyclic or corrupt parent chain.
pub const MAX_TREE_DEPTH: usize = 64;

/// Row identifier for a page.
pub type PageId = i64;

/// Row identifier for a user.
pub type UserId = i64;

/// Row identifier for a group.
pub type GroupId = i64;
