use crate::domain_model::{CompanyId, CompanyMembership, Identity};
use serde::{Deserialize, Serialize};

/// A resolved identity together with its company memberships.
///
/// `memberships` keeps the order the membership store returned. It is empty,
/// not absent, when the memberships could not be fetched.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub identity: Identity,
    pub memberships: Vec<CompanyMembership>,
}

impl Profile {
    pub fn new(identity: Identity, memberships: Vec<CompanyMembership>) -> Self {
        Profile {
            identity,
            memberships,
        }
    }

    pub fn membership(&self, company_id: &CompanyId) -> Option<&CompanyMembership> {
        self.memberships
            .iter()
            .find(|m| &m.company_id == company_id)
    }

    pub fn active_memberships(&self) -> impl Iterator<Item = &CompanyMembership> {
        self.memberships.iter().filter(|m| m.is_active)
    }

    pub fn has_permission(&self, company_id: &CompanyId, permission: &str) -> bool {
        self.membership(company_id)
            .is_some_and(|m| m.has_permission(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Role;
    use std::collections::BTreeSet;

    fn identity() -> Identity {
        Identity {
            id: "u1".parse().unwrap(),
            email: "a@b.com".to_string(),
            full_name: "A B".to_string(),
            role: Role::User,
        }
    }

    fn membership(id: &str, is_active: bool, permissions: &[&str]) -> CompanyMembership {
        CompanyMembership {
            company_id: CompanyId(id.to_string()),
            company_name: id.to_uppercase(),
            company_slug: id.to_string(),
            membership_role: "member".to_string(),
            is_active,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn permission_lookup_is_scoped_to_company() {
        let profile = Profile::new(
            identity(),
            vec![
                membership("c1", true, &["view_dashboard"]),
                membership("c2", true, &["manage_users"]),
            ],
        );

        assert!(profile.has_permission(&CompanyId("c1".into()), "view_dashboard"));
        assert!(!profile.has_permission(&CompanyId("c1".into()), "manage_users"));
        assert!(!profile.has_permission(&CompanyId("c3".into()), "view_dashboard"));
    }

    #[test]
    fn active_memberships_keep_store_order() {
        let profile = Profile::new(
            identity(),
            vec![
                membership("c2", true, &[]),
                membership("c1", false, &[]),
                membership("c0", true, &[]),
            ],
        );

        let ids: Vec<&str> = profile
            .active_memberships()
            .map(|m| m.company_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c2", "c0"]);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let profile = Profile::new(identity(), vec![membership("c1", true, &["b", "a"])]);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["identity"]["full_name"], "A B");
        assert_eq!(json["identity"]["role"], "user");
        assert_eq!(json["memberships"][0]["permissions"], serde_json::json!(["a", "b"]));
        assert_eq!(
            serde_json::from_value::<Profile>(json).unwrap().memberships[0].permissions,
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
    }
}
