//! Capability checks for the acting user.
//!
//! The acting user is always passed explicitly; there is no ambient "current
//! user". One trait method per capability so callers depend only on the
//! checks they need.

use crate::error::RevueError;
use crate::model::UserId;
use crate::storage::MemberStore;

/// Permission code for editing review settings.
pub const EDIT_REVIEW_SETTINGS: &str = "EDIT_REVIEW_SETTINGS";

/// Permission code for general CMS access.
pub const CMS_ACCESS: &str = "CMS_ACCESS";

/// Permission code that implies every capability.
pub const ADMIN: &str = "ADMIN";

/// Capability checks used to gate review-settings edits and CMS access.
pub trait Authorizer {
    /// Whether the user may edit review settings (mode, period, owners).
    fn can_edit_review_settings(&self, user_id: UserId) -> Result<bool, RevueError>;

    /// Whether the user may access the CMS at all.
    fn can_access_cms(&self, user_id: UserId) -> Result<bool, RevueError>;
}

/// Authorizer backed by group permission codes in the member store.
pub struct StoreAuthorizer<'a> {
    members: &'a MemberStore<'a>,
}

impl<'a> StoreAuthorizer<'a> {
    #[must_use]
    pub const fn new(members: &'a MemberStore<'a>) -> Self {
        Self { members }
    }

    fn has_code(&self, user_id: UserId, code: &str) -> Result<bool, RevueError> {
        let codes = self.members.permission_codes(user_id)?;
        Ok(codes.contains(ADMIN) || codes.contains(code))
    }
}

impl Authorizer for StoreAuthorizer<'_> {
    fn can_edit_review_settings(&self, user_id: UserId) -> Result<bool, RevueError> {
        self.has_code(user_id, EDIT_REVIEW_SETTINGS)
    }

    fn can_access_cms(&self, user_id: UserId) -> Result<bool, RevueError> {
        self.has_code(user_id, CMS_ACCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_admin_implies_everything() {
        let db = Database::open_in_memory().unwrap();
        let members = MemberStore::new(&db);

        let root = members.add_user("root", None).unwrap();
        let admins = members.add_group("admins", None).unwrap();
        members.add_member(admins.id, root.id).unwrap();
        members.grant(admins.id, ADMIN).unwrap();

        let auth = StoreAuthorizer::new(&members);
        assert!(auth.can_edit_review_settings(root.id).unwrap());
        assert!(auth.can_access_cms(root.id).unwrap());
    }

    #[test]
    fn test_specific_code_only() {
        let db = Database::open_in_memory().unwrap();
        let members = MemberStore::new(&db);

        let editor = members.add_user("editor", None).unwrap();
        let editors = members.add_group("editors", None).unwrap();
        members.add_member(editors.id, editor.id).unwrap();
        members.grant(editors.id, CMS_ACCESS).unwrap();

        let auth = StoreAuthorizer::new(&members);
        assert!(auth.can_access_cms(editor.id).unwrap());
        assert!(!auth.can_edit_review_settings(editor.id).unwrap());
    }

    #[test]
    fn test_no_groups_no_capabilities() {
        let db = Database::open_in_memory().unwrap();
        let members = MemberStore::new(&db);

        let nobody = members.add_user("nobody", None).unwrap();
        let auth = StoreAuthorizer::new(&members);
        assert!(!auth.can_access_cms(nobody.id).unwrap());
        assert!(!auth.can_edit_review_settings(nobody.id).unwrap());
    }
}
