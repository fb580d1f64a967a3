use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// `DashMap`-backed identity store with a call counter and an outage switch.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    identities: DashMap<UserId, Identity>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, identity: Identity) {
        self.identities.insert(identity.id.clone(), identity);
    }

    /// While set, every read fails with [`ProfileStoreError::Store`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_identity(&self, user_id: &UserId) -> Result<Identity, ProfileStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Store("profile store unavailable".to_string()));
        }

        self.identities
            .get(user_id)
            .map(|entry| entry.value().clone())
            .ok_or(ProfileStoreError::NotFound)
    }
}
