// Diagnostic channel for analysis failures
// Users only ever see the fixed error text; the detail goes here.

use crate::types::AnalysisError;
use tracing::error;

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &AnalysisError);
}

/// Default sink: logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, error: &AnalysisError) {
        error!(error = %error, kind = error_kind(error), "Image analysis failed");
    }
}

fn error_kind(error: &AnalysisError) -> &'static str {
    match error {
        AnalysisError::Transport(_) => "transport",
        AnalysisError::Status { .. } => "status",
        AnalysisError::Decode(_) => "decode",
        AnalysisError::InvalidPart(_) => "invalid_part",
        AnalysisError::Aborted(_) => "aborted",
    }
}
