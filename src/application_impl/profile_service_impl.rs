use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;
use std::time::Duration;

/// Bounded retry around the membership fetch. `max_attempts` counts the
/// first try, so `1` means no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        RetryPolicy {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before attempt `failed + 1`, doubling from `initial_backoff`.
    pub fn backoff_after(&self, failed: u32) -> Duration {
        let factor = 2u32.saturating_pow(failed.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub identity_timeout: Option<Duration>,
    pub membership_timeout: Option<Duration>,
    pub membership_retry: RetryPolicy,
}

enum Enrichment {
    Attached(Vec<CompanyMembership>),
    Degraded(MembershipFetchFailed),
}

/// Resolves a user id into a [`Profile`]: the identity is mandatory, the
/// memberships are best effort.
pub struct ProfileResolver {
    profile_store: Arc<dyn ProfileStore>,
    membership_store: Arc<dyn MembershipStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
    config: ResolverConfig,
}

impl ProfileResolver {
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        membership_store: Arc<dyn MembershipStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        ProfileResolver {
            profile_store,
            membership_store,
            diagnostics,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    async fn fetch_identity(&self, user_id: &UserId) -> Result<Identity, ProfileStoreError> {
        let fetch = self.profile_store.get_identity(user_id);
        let identity = match self.config.identity_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| ProfileStoreError::Timeout)??,
            None => fetch.await?,
        };

        if &identity.id != user_id {
            return Err(ProfileStoreError::Malformed(format!(
                "requested {user_id}, store returned {}",
                identity.id
            )));
        }
        Ok(identity)
    }

    async fn fetch_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CompanyMembership>, MembershipStoreError> {
        let fetch = self.membership_store.list_memberships(user_id);
        match self.config.membership_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| MembershipStoreError::Timeout)?,
            None => fetch.await,
        }
    }

    async fn enrich(&self, user_id: &UserId) -> Enrichment {
        let policy = &self.config.membership_retry;
        let max_attempts = policy.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.fetch_memberships(user_id).await {
                Ok(memberships) => return Enrichment::Attached(memberships),
                Err(source) if source.is_transient() && attempts < max_attempts => {
                    let delay = policy.backoff_after(attempts);
                    debug!(%user_id, attempts, ?delay, "membership fetch failed, retrying: {source}");
                    tokio::time::sleep(delay).await;
                }
                Err(source) => {
                    return Enrichment::Degraded(MembershipFetchFailed {
                        user_id: user_id.clone(),
                        attempts,
                        source,
                    });
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl ProfileService for ProfileResolver {
    async fn resolve(&self, user_id: &UserId) -> Result<Profile, ResolutionError> {
        let identity = self.fetch_identity(user_id).await.map_err(|source| {
            debug!(%user_id, "identity fetch failed: {source}");
            ResolutionError::IdentityUnavailable {
                user_id: user_id.clone(),
                source,
            }
        })?;

        let memberships = match self.enrich(user_id).await {
            Enrichment::Attached(memberships) => memberships,
            Enrichment::Degraded(failure) => {
                self.diagnostics.report(Diagnostic::from(&failure));
                Vec::new()
            }
        };

        Ok(Profile::new(identity, memberships))
    }
}
