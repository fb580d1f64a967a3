use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// `DashMap`-backed membership store. Each user's memberships are kept in
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    memberships: DashMap<UserId, Vec<CompanyMembership>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, user_id: UserId, membership: CompanyMembership) {
        self.memberships.entry(user_id).or_default().push(membership);
    }

    /// While set, every read fails with [`MembershipStoreError::Store`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn list_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CompanyMembership>, MembershipStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MembershipStoreError::Store(
                "membership store unavailable".to_string(),
            ));
        }

        Ok(self
            .memberships
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
