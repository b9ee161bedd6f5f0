//! Snapshot formatting for reports and diagnostics.
//!
//! Diagnostics are rendered one per line so insta snapshots stay
//! readable and diff cleanly.

use prose_linter::{Diagnostic, Report};

/// Format a list of diagnostics for snapshot testing.
///
/// One line per diagnostic: index, rule, severity, span, message, and
/// any suggestions.
///
/// # Example
///
/// ```ignore
/// use prose_test_utils::format_diagnostics;
///
/// let report = pipeline.run(text);
/// insta::assert_snapshot!(format_diagnostics(report.diagnostics()));
/// ```
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut line = format!(
                "[{}] {} {} {} {}",
                i + 1,
                d.rule,
                d.severity,
                d.span,
                d.message
            );
            if d.has_suggestions() {
                line.push_str(&format!(" (suggest: {})", d.suggestions.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a whole report: diagnostics first, then degradations.
pub fn format_report(report: &Report) -> String {
    let mut out = format_diagnostics(report.diagnostics());
    for degradation in report.degradations() {
        out.push_str(&format!("\ndegraded: {degradation}"));
    }
    out
}
