//! The merged output of one pipeline run.

use crate::diagnostics::{Degradation, Diagnostic};
use prose_text::{slice_of, OutOfRangeError};
use prose_types::Span;

/// Aggregated, ordered result of one run.
///
/// Owns the source text so renderers can extract excerpts, the merged
/// diagnostic list (registration order, then each analyzer's emission
/// order), and any recorded degradations. The core never re-ranks,
/// deduplicates, or filters; that is presentation-layer behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    source_text: String,
    diagnostics: Vec<Diagnostic>,
    degradations: Vec<Degradation>,
}

impl Report {
    pub(crate) fn new(
        source_text: String,
        diagnostics: Vec<Diagnostic>,
        degradations: Vec<Degradation>,
    ) -> Self {
        Self {
            source_text,
            diagnostics,
            degradations,
        }
    }

    /// The untouched input text of the run.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// All findings, in pipeline order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Analyzers that could not complete this run.
    #[must_use]
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// Extract the source excerpt a diagnostic's span refers to.
    pub fn excerpt(&self, span: Span) -> Result<&str, OutOfRangeError> {
        slice_of(&self.source_text, span)
    }

    /// Whether the run found nothing and nothing was degraded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.degradations.is_empty()
    }

    /// Whether any finding carries error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}
