use super::{InMemoryMembershipStore, InMemoryProfileStore};
use crate::domain_model::*;
use crate::domain_port::*;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Fixture data for the in-memory backend.
///
/// ```json
/// {
///   "identities": [{ "id": "u1", "email": "a@b.com", "full_name": "A B", "role": "user" }],
///   "memberships": [{ "user_id": "u1", "companies": [ ... ] }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub identities: Vec<IdentityRecord>,
    #[serde(default)]
    pub memberships: Vec<SeedMemberships>,
}

#[derive(Debug, Deserialize)]
pub struct SeedMemberships {
    pub user_id: String,
    pub companies: Vec<MembershipRecord>,
}

impl Seed {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parse seed")
    }

    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| format!("read seed {path}"))?;
        Self::from_json_str(&json)
    }

    /// Validates every record the same way a real store would before
    /// handing it out.
    pub fn into_stores(self) -> Result<(InMemoryProfileStore, InMemoryMembershipStore)> {
        let profile_store = InMemoryProfileStore::new();
        for record in self.identities {
            profile_store.insert(Identity::try_from(record).map_err(|e| anyhow!(e))?);
        }

        let membership_store = InMemoryMembershipStore::new();
        for entry in self.memberships {
            let user_id: UserId = entry
                .user_id
                .parse()
                .map_err(|e| anyhow!("seed membership owner: {e}"))?;
            for record in entry.companies {
                let membership = CompanyMembership::try_from(record).map_err(|e| anyhow!(e))?;
                membership_store.push(user_id.clone(), membership);
            }
        }

        Ok((profile_store, membership_store))
    }
}
