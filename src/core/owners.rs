//! Content owner resolution.
//!
//! Merges owner groups (expanded to their whole family of sub-groups) and
//! explicitly listed users into a deduplicated set of eligible reviewers, and
//! answers "may this user review that page?".

use crate::error::RevueError;
use crate::model::{GroupId, ReviewConfig, User, UserId};
use crate::storage::MemberStore;

use super::resolver::EffectiveSettings;

/// Merge owner groups and users into a deduplicated list of reviewers.
///
/// Each group is expanded to its family (the group plus all descendant
/// sub-groups) and every member of the family is collected; explicit users
/// are unioned in. Order is stable for a given input: group members by user
/// ID, then explicit users not already present, in listed order.
pub fn merge_owners(
    members: &MemberStore<'_>,
    group_ids: &[GroupId],
    user_ids: &[UserId],
) -> Result<Vec<User>, RevueError> {
    let mut family = Vec::new();
    for group_id in group_ids {
        family.extend(members.group_family(*group_id)?);
    }
    family.sort_unstable();
    family.dedup();

    let mut owners = members.members_of_groups(&family)?;

    for user_id in user_ids {
        if owners.iter().any(|u| u.id == *user_id) {
            continue;
        }
        owners.push(members.require_user(*user_id)?);
    }

    Ok(owners)
}

/// Owners governed by the given effective settings. Disabled settings have no
/// owners.
pub fn effective_owners(
    members: &MemberStore<'_>,
    effective: &EffectiveSettings,
) -> Result<Vec<User>, RevueError> {
    match effective.config() {
        Some(config) => merge_owners(members, &config.owner_groups, &config.owner_users),
        None => Ok(Vec::new()),
    }
}

/// Whether a user may mark content governed by this config as reviewed.
///
/// An unowned config (no groups, no users) cannot be reviewed by anyone.
pub fn can_review(
    members: &MemberStore<'_>,
    user_id: UserId,
    config: &ReviewConfig,
) -> Result<bool, RevueError> {
    if !config.has_owners() {
        return Ok(false);
    }

    if config.owner_users.contains(&user_id) {
        return Ok(true);
    }

    let mut family = Vec::new();
    for group_id in &config.owner_groups {
        family.extend(members.group_family(*group_id)?);
    }

    members.user_in_groups(user_id, &family)
}

/// Display names for the owners of the given effective settings: group
/// breadcrumbs first, then user names, comma-joined.
pub fn owner_names(
    members: &MemberStore<'_>,
    effective: &EffectiveSettings,
) -> Result<String, RevueError> {
    let Some(config) = effective.config() else {
        return Ok(String::new());
    };

    let mut names = Vec::new();
    for group_id in &config.owner_groups {
        names.push(members.breadcrumbs(*group_id)?);
    }
    for user_id in &config.owner_users {
        names.push(members.require_user(*user_id)?.name);
    }

    Ok(names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewMode;
    use crate::storage::Database;

    struct Fixture {
        db: Database,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                db: Database::open_in_memory().unwrap(),
            }
        }

        fn members(&self) -> MemberStore<'_> {
            MemberStore::new(&self.db)
        }
    }

    fn config(groups: Vec<i64>, users: Vec<i64>) -> ReviewConfig {
        ReviewConfig {
            mode: ReviewMode::Custom,
            review_period_days: 30,
            owner_groups: groups,
            owner_users: users,
        }
    }

    #[test]
    fn test_merge_owners_deduplicates() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        let bob = members.add_user("bob", None).unwrap();
        let editors = members.add_group("editors", None).unwrap();
        members.add_member(editors.id, alice.id).unwrap();

        // alice is both a group member and an explicit owner
        let owners = merge_owners(&members, &[editors.id], &[alice.id, bob.id]).unwrap();
        let names: Vec<&str> = owners.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_merge_owners_idempotent_under_duplicate_input() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        let editors = members.add_group("editors", None).unwrap();
        members.add_member(editors.id, alice.id).unwrap();

        let once = merge_owners(&members, &[editors.id], &[alice.id]).unwrap();
        let doubled =
            merge_owners(&members, &[editors.id, editors.id], &[alice.id, alice.id]).unwrap();
        assert_eq!(once, doubled);
    }

    #[test]
    fn test_merge_owners_order_independent_membership() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        let bob = members.add_user("bob", None).unwrap();
        let g1 = members.add_group("g1", None).unwrap();
        let g2 = members.add_group("g2", None).unwrap();
        members.add_member(g1.id, alice.id).unwrap();
        members.add_member(g2.id, bob.id).unwrap();

        let forward = merge_owners(&members, &[g1.id, g2.id], &[]).unwrap();
        let backward = merge_owners(&members, &[g2.id, g1.id], &[]).unwrap();

        let mut f: Vec<i64> = forward.iter().map(|u| u.id).collect();
        let mut b: Vec<i64> = backward.iter().map(|u| u.id).collect();
        f.sort_unstable();
        b.sort_unstable();
        assert_eq!(f, b);
    }

    #[test]
    fn test_merge_owners_includes_subgroup_members() {
        let fx = Fixture::new();
        let members = fx.members();

        let carol = members.add_user("carol", None).unwrap();
        let editors = members.add_group("editors", None).unwrap();
        let news = members.add_group("news", Some(editors.id)).unwrap();
        members.add_member(news.id, carol.id).unwrap();

        let owners = merge_owners(&members, &[editors.id], &[]).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, carol.id);
    }

    #[test]
    fn test_can_review_unowned_config_denies_everyone() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        assert!(!can_review(&members, alice.id, &config(vec![], vec![])).unwrap());
    }

    #[test]
    fn test_can_review_via_subgroup() {
        let fx = Fixture::new();
        let members = fx.members();

        let u = members.add_user("u", None).unwrap();
        let outsider = members.add_user("outsider", None).unwrap();
        let g = members.add_group("g", None).unwrap();
        let sub = members.add_group("sub", Some(g.id)).unwrap();
        members.add_member(sub.id, u.id).unwrap();

        let cfg = config(vec![g.id], vec![]);
        assert!(can_review(&members, u.id, &cfg).unwrap());
        assert!(!can_review(&members, outsider.id, &cfg).unwrap());
    }

    #[test]
    fn test_can_review_explicit_user() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        let bob = members.add_user("bob", None).unwrap();

        let cfg = config(vec![], vec![alice.id]);
        assert!(can_review(&members, alice.id, &cfg).unwrap());
        assert!(!can_review(&members, bob.id, &cfg).unwrap());
    }

    #[test]
    fn test_owner_names_uses_breadcrumbs_and_user_names() {
        let fx = Fixture::new();
        let members = fx.members();

        let alice = members.add_user("alice", None).unwrap();
        let editors = members.add_group("editors", None).unwrap();
        let news = members.add_group("news", Some(editors.id)).unwrap();

        let effective = EffectiveSettings::SiteDefault {
            config: config(vec![news.id], vec![alice.id]),
        };
        assert_eq!(
            owner_names(&members, &effective).unwrap(),
            "editors > news, alice"
        );

        assert_eq!(
            owner_names(&members, &EffectiveSettings::Disabled).unwrap(),
            ""
        );
    }
}
