use crate::domain_model::*;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("identity not found")]
    NotFound,
    #[error("malformed identity record: {0}")]
    Malformed(String),
    #[error("identity store timed out")]
    Timeout,
    #[error("store error: {0}")]
    Store(String),
}

/// Identity as read from a backing store, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: String,
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = ProfileStoreError;

    fn try_from(record: IdentityRecord) -> Result<Self, Self::Error> {
        let id: UserId = record
            .id
            .parse()
            .map_err(|e| ProfileStoreError::Malformed(format!("id: {e}")))?;
        if record.email.trim().is_empty() || !record.email.contains('@') {
            return Err(ProfileStoreError::Malformed(format!(
                "email of {id}: {:?}",
                record.email
            )));
        }
        let role: Role = record
            .role
            .parse()
            .map_err(|e| ProfileStoreError::Malformed(format!("role of {id}: {e}")))?;

        Ok(Identity {
            id,
            email: record.email,
            full_name: record.full_name.unwrap_or_default(),
            role,
        })
    }
}

#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the identity for `user_id`. A missing row is `NotFound`.
    async fn get_identity(&self, user_id: &UserId) -> Result<Identity, ProfileStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, role: &str) -> IdentityRecord {
        IdentityRecord {
            id: "u1".to_string(),
            email: email.to_string(),
            full_name: None,
            role: role.to_string(),
        }
    }

    #[test]
    fn valid_record_converts() {
        let identity = Identity::try_from(record("a@b.com", "admin")).unwrap();
        assert_eq!(identity.id.as_str(), "u1");
        assert_eq!(identity.full_name, "");
        assert!(identity.is_admin());
    }

    #[test]
    fn unrecognised_role_is_kept() {
        let identity = Identity::try_from(record("a@b.com", "Superuser")).unwrap();
        assert_eq!(identity.role, Role::Other("superuser".to_string()));
        assert!(!identity.is_admin());
    }

    #[test]
    fn malformed_records_are_store_errors() {
        assert!(matches!(
            Identity::try_from(record("", "user")),
            Err(ProfileStoreError::Malformed(_))
        ));
        assert!(matches!(
            Identity::try_from(record("a@b.com", "")),
            Err(ProfileStoreError::Malformed(_))
        ));

        let mut blank_id = record("a@b.com", "user");
        blank_id.id = " ".to_string();
        assert!(matches!(
            Identity::try_from(blank_id),
            Err(ProfileStoreError::Malformed(_))
        ));
    }
}
