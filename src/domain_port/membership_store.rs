use crate::domain_model::*;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipStoreError {
    #[error("malformed membership record: {0}")]
    Malformed(String),
    #[error("permission lookup failed: {0}")]
    Permissions(String),
    #[error("membership store timed out")]
    Timeout,
    #[error("store error: {0}")]
    Store(String),
}

impl MembershipStoreError {
    /// Whether a later attempt could succeed. Malformed data stays malformed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, MembershipStoreError::Malformed(_))
    }
}

/// Membership as read from a backing store, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipRecord {
    pub company_id: String,
    pub company_name: String,
    pub company_slug: String,
    pub membership_role: String,
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl TryFrom<MembershipRecord> for CompanyMembership {
    type Error = MembershipStoreError;

    fn try_from(record: MembershipRecord) -> Result<Self, Self::Error> {
        for (field, value) in [
            ("company_id", &record.company_id),
            ("company_slug", &record.company_slug),
            ("membership_role", &record.membership_role),
        ] {
            if value.trim().is_empty() {
                return Err(MembershipStoreError::Malformed(format!(
                    "empty {field} (company {:?})",
                    record.company_id
                )));
            }
        }

        Ok(CompanyMembership {
            company_id: CompanyId(record.company_id),
            company_name: record.company_name,
            company_slug: record.company_slug,
            membership_role: record.membership_role,
            is_active: record.is_active,
            permissions: record.permissions.into_iter().collect::<BTreeSet<_>>(),
        })
    }
}

#[async_trait::async_trait]
pub trait MembershipStore: Send + Sync {
    /// All memberships of `user_id`, in the store's order. No memberships is `Ok(vec![])`.
    async fn list_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CompanyMembership>, MembershipStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MembershipRecord {
        MembershipRecord {
            company_id: "c1".to_string(),
            company_name: "Acme".to_string(),
            company_slug: "acme".to_string(),
            membership_role: "admin".to_string(),
            is_active: true,
            permissions: vec!["view_dashboard".to_string(), "view_dashboard".to_string()],
        }
    }

    #[test]
    fn duplicate_permissions_collapse() {
        let membership = CompanyMembership::try_from(record()).unwrap();
        assert_eq!(membership.permissions.len(), 1);
        assert_eq!(membership.company_id, CompanyId("c1".to_string()));
    }

    #[test]
    fn only_malformed_records_are_permanent() {
        assert!(!MembershipStoreError::Malformed("x".to_string()).is_transient());
        assert!(MembershipStoreError::Permissions("x".to_string()).is_transient());
        assert!(MembershipStoreError::Timeout.is_transient());
        assert!(MembershipStoreError::Store("x".to_string()).is_transient());
    }

    #[test]
    fn blank_slug_is_malformed() {
        let mut r = record();
        r.company_slug = String::new();
        assert!(matches!(
            CompanyMembership::try_from(r),
            Err(MembershipStoreError::Malformed(_))
        ));
    }
}
