use crate::domain_port::*;
use std::sync::{Mutex, PoisonError};

/// Keeps every reported diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct RecordingDiagnosticSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for RecordingDiagnosticSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
