//! The analyzer capability every rule implements.

use crate::diagnostics::Diagnostic;
use prose_text::TextModel;
use prose_types::DiagnosticSeverity;
use thiserror::Error;

/// An analyzer could not run at all, as opposed to finding nothing.
///
/// The pipeline records this as a degradation on the report and keeps
/// going; it never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct AnalyzerUnavailable {
    /// Human-readable explanation, recorded on the report.
    pub reason: String,
}

impl AnalyzerUnavailable {
    /// Describe why the analyzer cannot run.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// What one analyzer invocation yields.
pub type AnalyzerResult = std::result::Result<Vec<Diagnostic>, AnalyzerUnavailable>;

/// One independent rule-checking unit operating over the full text.
///
/// Implementations must be deterministic for identical (text, options)
/// input and must not carry state between invocations; the same analyzer
/// instance may serve concurrent runs.
pub trait Analyzer: Send + Sync {
    /// Unique kebab-case rule name, used in configuration and diagnostics.
    fn name(&self) -> &'static str;

    /// One-line description for rule listings.
    fn description(&self) -> &'static str;

    /// Severity applied when configuration does not override it.
    fn default_severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    /// Check that an options value is understood by this analyzer.
    ///
    /// Called at pipeline construction so malformed configuration fails
    /// before a run starts. The default accepts anything, matching rules
    /// that take no options.
    fn validate_options(&self, _options: &serde_json::Value) -> Result<(), String> {
        Ok(())
    }

    /// Scan the text and report findings.
    ///
    /// `options` is this analyzer's entry from the pipeline configuration,
    /// already validated by [`Analyzer::validate_options`].
    fn analyze(&self, model: &TextModel, options: Option<&serde_json::Value>) -> AnalyzerResult;
}
