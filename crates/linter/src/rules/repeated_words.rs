use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use crate::rules::whitespace_between;
use prose_text::TextModel;

/// Flags immediately-adjacent duplicate words.
///
/// Comparison is case-insensitive and the words must be separated by
/// whitespace only. A longer run produces a single diagnostic covering
/// every occurrence, so `the the the` is one finding, not two.
///
/// Example:
///
/// ```text
/// the the quick fox  ->  Expected `the` once, not twice
/// ```
pub struct RepeatedWordsRule;

const RULE_NAME: &str = "repeated-words";

impl Analyzer for RepeatedWordsRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flags immediately-adjacent duplicate words"
    }

    fn analyze(&self, model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
        let words = model.words();
        let mut diagnostics = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let head = words[i].text.to_lowercase();
            let mut end = i;
            while end + 1 < words.len()
                && words[end + 1].text.to_lowercase() == head
                && whitespace_between(model.text(), words[end].span, words[end + 1].span)
            {
                end += 1;
            }

            let count = end - i + 1;
            if count > 1 {
                let span = words[i].span.cover(words[end].span);
                let message = if count == 2 {
                    format!("Expected `{}` once, not twice", words[i].text)
                } else {
                    format!("Expected `{}` once, not {count} times", words[i].text)
                };
                diagnostics.push(
                    Diagnostic::warning(RULE_NAME, message, span).with_suggestion(words[i].text),
                );
            }
            i = end + 1;
        }

        Ok(diagnostics)
    }
}
