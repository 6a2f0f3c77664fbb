//! User and group storage.
//!
//! Groups form a single-parent hierarchy; owning content via a group includes
//! every descendant sub-group's members. Groups also carry permission codes
//! used by the authorization layer.

use rusqlite::{params, Row};
use std::collections::HashSet;

use crate::error::RevueError;
use crate::model::{Group, GroupId, User, UserId, MAX_TREE_DEPTH};

use super::database::OptionalExt;
use super::Database;

/// Storage for users and groups.
pub struct MemberStore<'a> {
    db: &'a Database,
}

impl<'a> MemberStore<'a> {
    /// Create a member store backed by the given database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new user.
    pub fn add_user(&self, name: &str, email: Option<&str>) -> Result<User, RevueError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2)",
            params![name, email],
        )
        .map_err(|e| RevueError::Database(format!("Failed to insert user: {e}")))?;

        Ok(User {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            email: email.map(str::to_string),
        })
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: UserId) -> Result<Option<User>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, email FROM users WHERE id = ?1")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([id], row_to_user)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query user: {e}")))
    }

    /// Get a user by name.
    pub fn get_user_by_name(&self, name: &str) -> Result<Option<User>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, email FROM users WHERE name = ?1")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([name], row_to_user)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query user: {e}")))
    }

    /// Get a user by ID, failing if it does not exist.
    pub fn require_user(&self, id: UserId) -> Result<User, RevueError> {
        self.get_user(id)?
            .ok_or_else(|| RevueError::NotFound(format!("user {id}")))
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<User>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, email FROM users ORDER BY name")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_user)
            .map_err(|e| RevueError::Database(format!("Failed to query users: {e}")))?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(users)
    }

    /// Insert a new group, optionally under a parent group.
    pub fn add_group(&self, name: &str, parent_id: Option<GroupId>) -> Result<Group, RevueError> {
        if let Some(parent) = parent_id {
            self.require_group(parent)?;
        }
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO member_groups (name, parent_id) VALUES (?1, ?2)",
            params![name, parent_id],
        )
        .map_err(|e| RevueError::Database(format!("Failed to insert group: {e}")))?;

        Ok(Group {
            id: conn.last_insert_rowid(),
            parent_id,
            name: name.to_string(),
        })
    }

    /// Get a group by ID.
    pub fn get_group(&self, id: GroupId) -> Result<Option<Group>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, parent_id, name FROM member_groups WHERE id = ?1")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([id], row_to_group)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query group: {e}")))
    }

    /// Get a group by name.
    pub fn get_group_by_name(&self, name: &str) -> Result<Option<Group>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, parent_id, name FROM member_groups WHERE name = ?1")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([name], row_to_group)
            .optional()
            .map_err(|e| RevueError::Database(format!("Failed to query group: {e}")))
    }

    /// Get a group by ID, failing if it does not exist.
    pub fn require_group(&self, id: GroupId) -> Result<Group, RevueError> {
        self.get_group(id)?
            .ok_or_else(|| RevueError::NotFound(format!("group {id}")))
    }

    /// List all groups.
    pub fn list_groups(&self) -> Result<Vec<Group>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, parent_id, name FROM member_groups ORDER BY name")
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_group)
            .map_err(|e| RevueError::Database(format!("Failed to query groups: {e}")))?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(groups)
    }

    /// Add a user to a group.
    pub fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), RevueError> {
        self.require_group(group_id)?;
        self.require_user(user_id)?;

        self.db
            .connection()
            .execute(
                "INSERT OR IGNORE INTO group_members (group_id, user_id) VALUES (?1, ?2)",
                params![group_id, user_id],
            )
            .map_err(|e| RevueError::Database(format!("Failed to add member: {e}")))?;

        Ok(())
    }

    /// Grant a permission code to a group.
    pub fn grant(&self, group_id: GroupId, code: &str) -> Result<(), RevueError> {
        self.require_group(group_id)?;

        self.db
            .connection()
            .execute(
                "INSERT OR IGNORE INTO group_permissions (group_id, code) VALUES (?1, ?2)",
                params![group_id, code],
            )
            .map_err(|e| RevueError::Database(format!("Failed to grant permission: {e}")))?;

        Ok(())
    }

    /// A group's family: the group itself plus all descendant sub-groups.
    ///
    /// Breadth-first over child links; the visited set doubles as a cycle
    /// guard so a corrupt hierarchy cannot loop.
    pub fn group_family(&self, group_id: GroupId) -> Result<Vec<GroupId>, RevueError> {
        self.require_group(group_id)?;
        let conn = self.db.connection();

        let mut family = vec![group_id];
        let mut seen: HashSet<GroupId> = HashSet::from([group_id]);
        let mut frontier = vec![group_id];

        for _ in 0..MAX_TREE_DEPTH {
            if frontier.is_empty() {
                return Ok(family);
            }

            let mut next = Vec::new();
            for id in frontier {
                let mut stmt = conn
                    .prepare("SELECT id FROM member_groups WHERE parent_id = ?1")
                    .map_err(|e| {
                        RevueError::Database(format!("Failed to prepare query: {e}"))
                    })?;
                let rows = stmt
                    .query_map([id], |row| row.get::<_, GroupId>(0))
                    .map_err(|e| RevueError::Database(format!("Failed to query groups: {e}")))?;

                for row in rows {
                    let child = row.map_err(|e| RevueError::Database(e.to_string()))?;
                    if seen.insert(child) {
                        family.push(child);
                        next.push(child);
                    }
                }
            }
            frontier = next;
        }

        Err(RevueError::Configuration(format!(
            "group hierarchy under group {group_id} exceeds depth {MAX_TREE_DEPTH}"
        )))
    }

    /// All direct members of the given groups, ordered by user ID.
    pub fn members_of_groups(&self, group_ids: &[GroupId]) -> Result<Vec<User>, RevueError> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.db.connection();

        // group_ids come from our own queries, never user input
        let placeholders = group_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut stmt = conn
            .prepare(&format!(
                r"SELECT DISTINCT u.id, u.name, u.email
                  FROM users u
                  JOIN group_members gm ON gm.user_id = u.id
                  WHERE gm.group_id IN ({placeholders})
                  ORDER BY u.id"
            ))
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_user)
            .map_err(|e| RevueError::Database(format!("Failed to query members: {e}")))?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(users)
    }

    /// Whether a user is a direct member of any of the given groups.
    pub fn user_in_groups(&self, user_id: UserId, group_ids: &[GroupId]) -> Result<bool, RevueError> {
        Ok(self
            .members_of_groups(group_ids)?
            .iter()
            .any(|u| u.id == user_id))
    }

    /// Group display name as a breadcrumb trail from the root group down.
    pub fn breadcrumbs(&self, group_id: GroupId) -> Result<String, RevueError> {
        let mut names = Vec::new();
        let mut current = Some(group_id);

        for _ in 0..MAX_TREE_DEPTH {
            let Some(id) = current else {
                names.reverse();
                return Ok(names.join(" > "));
            };
            let group = self.require_group(id)?;
            names.push(group.name);
            current = group.parent_id;
        }

        Err(RevueError::Configuration(format!(
            "group hierarchy above group {group_id} exceeds depth {MAX_TREE_DEPTH}"
        )))
    }

    /// Permission codes a user holds through any of their groups.
    pub fn permission_codes(&self, user_id: UserId) -> Result<HashSet<String>, RevueError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT DISTINCT gp.code
                  FROM group_permissions gp
                  JOIN group_members gm ON gm.group_id = gp.group_id
                  WHERE gm.user_id = ?1",
            )
            .map_err(|e| RevueError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([user_id], |row| row.get::<_, String>(0))
            .map_err(|e| RevueError::Database(format!("Failed to query permissions: {e}")))?;

        let mut codes = HashSet::new();
        for row in rows {
            codes.insert(row.map_err(|e| RevueError::Database(e.to_string()))?);
        }
        Ok(codes)
    }
}

/// Convert a database row to a User.
fn row_to_user(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

/// Convert a database row to a Group.
fn row_to_group(row: &Row<'_>) -> Result<Group, rusqlite::Error> {
    Ok(Group {
        id: row.get(0)?,
        parent_id: row.get(1)?,
        name: row.get(2)?,
    })
}
