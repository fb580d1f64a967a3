use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(
    Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CompanyId(pub String);

impl CompanyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's standing in one organization.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompanyMembership {
    pub company_id: CompanyId,
    pub company_name: String,
    pub company_slug: String,
    pub membership_role: String,
    pub is_active: bool,
    pub permissions: BTreeSet<String>,
}

impl CompanyMembership {
    /// Inactive memberships grant nothing.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_active && self.permissions.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(is_active: bool) -> CompanyMembership {
        CompanyMembership {
            company_id: CompanyId("c1".to_string()),
            company_name: "Acme".to_string(),
            company_slug: "acme".to_string(),
            membership_role: "admin".to_string(),
            is_active,
            permissions: BTreeSet::from(["view_dashboard".to_string()]),
        }
    }

    #[test]
    fn active_membership_grants_its_permissions() {
        let m = membership(true);
        assert!(m.has_permission("view_dashboard"));
        assert!(!m.has_permission("manage_billing"));
    }

    #[test]
    fn inactive_membership_grants_nothing() {
        assert!(!membership(false).has_permission("view_dashboard"));
    }
}
