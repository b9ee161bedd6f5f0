//! Diagnostic types produced by analyzers.

use prose_types::{DiagnosticSeverity, Span};

/// One reported issue, anchored to a span of the analyzed text.
///
/// Produced by exactly one analyzer invocation and immutable once emitted;
/// the pipeline only rewrites `severity` when configuration overrides the
/// rule's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the analyzer that produced this diagnostic
    pub rule: String,
    /// How the finding is reported
    pub severity: DiagnosticSeverity,
    /// Human-readable description of the finding
    pub message: String,
    /// The text span the finding refers to
    pub span: Span,
    /// Suggested replacement texts, best first (possibly empty)
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit severity.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            message: message.into(),
            span,
            suggestions: Vec::new(),
        }
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(rule, DiagnosticSeverity::Warning, message, span)
    }

    /// Create an error diagnostic.
    #[must_use]
    pub fn error(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(rule, DiagnosticSeverity::Error, message, span)
    }

    /// Attach suggested replacements.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Attach a single suggested replacement.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions = vec![suggestion.into()];
        self
    }

    /// Whether any replacement is suggested.
    #[must_use]
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// A recorded, non-fatal analyzer failure.
///
/// Degradations reduce a run's coverage without aborting it: the report
/// still carries every other analyzer's findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    /// Name of the analyzer that failed
    pub rule: String,
    /// Why it failed
    pub reason: String,
}

impl Degradation {
    /// Record a degradation for a rule.
    #[must_use]
    pub fn new(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.rule, self.reason)
    }
}
