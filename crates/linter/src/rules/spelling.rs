use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerUnavailable};
use crate::diagnostics::Diagnostic;
use prose_dict::Dictionary;
use prose_text::TextModel;
use serde::Deserialize;
use std::sync::Arc;

/// Looks words up in the loaded dictionary and flags misses.
///
/// Needs a [`Dictionary`]; without one the rule reports itself
/// unavailable and the run degrades instead of failing. Suggestions come
/// from the dictionary, nearest first, capped by the `max` option.
///
/// Example:
///
/// ```text
/// Color is fine.  ->  `Color` is misspelt; did you mean `Colour`?
/// ```
pub struct SpellingRule {
    dictionary: Option<Arc<Dictionary>>,
}

const RULE_NAME: &str = "spelling";

impl SpellingRule {
    #[must_use]
    pub fn new(dictionary: Option<Arc<Dictionary>>) -> Self {
        Self { dictionary }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SpellingOptions {
    /// Maximum number of suggested corrections per miss.
    max: usize,
    /// Words accepted without a dictionary entry.
    allow: Vec<String>,
}

impl Default for SpellingOptions {
    fn default() -> Self {
        Self {
            max: 5,
            allow: Vec::new(),
        }
    }
}

fn parse_options(options: Option<&serde_json::Value>) -> SpellingOptions {
    options
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Trims a trailing possessive (`'s` or `’s`) before lookup.
fn lookup_form(token: &str) -> &str {
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("\u{2019}s"))
        .unwrap_or(token)
}

/// Words butted up against digits (`2nd`, `v2`, hex fragments) are not
/// prose and never worth reporting.
fn touches_digit(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

impl Analyzer for SpellingRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Checks words against the loaded dictionary"
    }

    fn validate_options(&self, options: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<SpellingOptions>(options.clone())
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn analyze(&self, model: &TextModel, options: Option<&serde_json::Value>) -> AnalyzerResult {
        let Some(dictionary) = &self.dictionary else {
            return Err(AnalyzerUnavailable::new("no dictionary loaded"));
        };

        let options = parse_options(options);
        let allowed: Vec<String> = options.allow.iter().map(|entry| entry.to_lowercase()).collect();
        let mut diagnostics = Vec::new();

        for word in model.words() {
            if word.text.chars().count() < 2 {
                continue;
            }
            if touches_digit(model.text(), word.span.start, word.span.end) {
                continue;
            }
            if allowed.contains(&word.text.to_lowercase()) {
                continue;
            }

            let form = lookup_form(word.text);
            if dictionary.contains(form) {
                continue;
            }

            let suggestions = dictionary.suggest(form, options.max);
            let message = if suggestions.is_empty() {
                format!("`{}` is misspelt", word.text)
            } else {
                format!(
                    "`{}` is misspelt; did you mean `{}`?",
                    word.text,
                    suggestions.join("`, `")
                )
            };
            diagnostics.push(
                Diagnostic::warning(RULE_NAME, message, word.span).with_suggestions(suggestions),
            );
        }

        Ok(diagnostics)
    }
}
