use crate::domain_port::{Diagnostic, DiagnosticSink};

/// Emits diagnostics as `warn` events.
#[derive(Debug, Default)]
pub struct TracingDiagnosticSink;

impl TracingDiagnosticSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnosticSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = ?diagnostic.kind,
            user_id = %diagnostic.user_id,
            "{}",
            diagnostic.message
        );
    }
}
