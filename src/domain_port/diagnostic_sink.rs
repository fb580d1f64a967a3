use crate::domain_model::UserId;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DiagnosticKind {
    MembershipFetchFailed,
}

/// A recoverable condition worth a human's attention.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub user_id: UserId,
    pub message: String,
}

/// Out-of-band channel for failures that are not surfaced to the caller.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
