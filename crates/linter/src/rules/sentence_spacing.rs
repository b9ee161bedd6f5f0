use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use prose_text::TextModel;
use prose_types::Span;
use serde::Deserialize;

/// Flags inter-sentence spacing that deviates from the configured width.
///
/// Only runs of plain spaces on one line are checked; a line break
/// between sentences is a formatting choice this rule stays out of.
///
/// Example:
///
/// ```text
/// One thing.  Another.  ->  Expected 1 space between sentences, not 2
/// ```
pub struct SentenceSpacingRule;

const RULE_NAME: &str = "sentence-spacing";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SentenceSpacingOptions {
    /// Expected number of spaces between sentences.
    size: usize,
}

impl Default for SentenceSpacingOptions {
    fn default() -> Self {
        Self { size: 1 }
    }
}

fn parse_options(options: Option<&serde_json::Value>) -> SentenceSpacingOptions {
    options
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

impl Analyzer for SentenceSpacingRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Checks the amount of whitespace between sentences"
    }

    fn validate_options(&self, options: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<SentenceSpacingOptions>(options.clone())
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn analyze(&self, model: &TextModel, options: Option<&serde_json::Value>) -> AnalyzerResult {
        let options = parse_options(options);
        let sentences = model.sentences();
        let mut diagnostics = Vec::new();

        for pair in sentences.windows(2) {
            let gap = Span::new(pair[0].end, pair[1].start);
            let gap_text = &model.text()[gap.start..gap.end];
            if gap_text.contains('\n') {
                continue;
            }
            if !gap_text.chars().all(|c| c == ' ') {
                continue;
            }

            let count = gap_text.len();
            if count == options.size {
                continue;
            }

            let noun = if options.size == 1 { "space" } else { "spaces" };
            diagnostics.push(
                Diagnostic::warning(
                    RULE_NAME,
                    format!(
                        "Expected {} {noun} between sentences, not {count}",
                        options.size
                    ),
                    gap,
                )
                .with_suggestion(" ".repeat(options.size)),
            );
        }

        Ok(diagnostics)
    }
}
