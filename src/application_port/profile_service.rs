use crate::domain_model::*;
use crate::domain_port::*;

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("identity unavailable for user {user_id}: {source}")]
    IdentityUnavailable {
        user_id: UserId,
        source: ProfileStoreError,
    },
}

/// Membership enrichment gave up. Reported through a [`DiagnosticSink`],
/// never returned to the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("membership fetch failed for user {user_id} after {attempts} attempt(s): {source}")]
pub struct MembershipFetchFailed {
    pub user_id: UserId,
    pub attempts: u32,
    pub source: MembershipStoreError,
}

impl From<&MembershipFetchFailed> for Diagnostic {
    fn from(failure: &MembershipFetchFailed) -> Self {
        Diagnostic {
            kind: DiagnosticKind::MembershipFetchFailed,
            user_id: failure.user_id.clone(),
            message: failure.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    async fn resolve(&self, user_id: &UserId) -> Result<Profile, ResolutionError>;
}
