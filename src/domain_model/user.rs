use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must not be empty")]
pub struct InvalidUserId;

/// Opaque identifier issued by the identity provider. Never empty.
#[derive(
    Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::try_from(s.to_owned())
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(InvalidUserId);
        }
        Ok(UserId(value))
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role must not be empty")]
pub struct InvalidRole;

/// Platform role. Roles this crate has no special handling for are kept
/// verbatim (lowercased) in `Other` so new provider roles pass through.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "" => Err(InvalidRole),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Ok(Role::Other(name)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = InvalidRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// The authenticated user's base profile record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_blank_input() {
        assert_eq!("".parse::<UserId>(), Err(InvalidUserId));
        assert_eq!("   ".parse::<UserId>(), Err(InvalidUserId));
        assert_eq!("u1".parse::<UserId>().unwrap().as_str(), "u1");
    }

    #[test]
    fn user_id_deserialization_is_validated() {
        let id: UserId = serde_json::from_str("\"u1\"").unwrap();
        assert_eq!(id.to_string(), "u1");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" ".parse::<Role>(), Err(InvalidRole));
    }

    #[test]
    fn unrecognised_roles_pass_through() {
        let role: Role = " Owner ".parse().unwrap();
        assert_eq!(role, Role::Other("owner".to_string()));
        assert_eq!(role.to_string(), "owner");

        let identity = Identity {
            id: "u1".parse().unwrap(),
            email: "a@b.com".to_string(),
            full_name: String::new(),
            role,
        };
        assert!(!identity.is_admin());

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["role"], "owner");
        let back: Identity = serde_json::from_value(json).unwrap();
        assert_eq!(back, identity);
        assert!(serde_json::from_str::<Role>("\"\"").is_err());
    }
}
