//! Users and groups.

use serde::{Deserialize, Serialize};

use super::{GroupId, UserId};

/// A CMS user that can own and review content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
}

/// A group of users. Groups form their own single-parent hierarchy;
/// assigning a group as a content owner includes all of its sub-groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub parent_id: Option<GroupId>,
    pub name: String,
}
