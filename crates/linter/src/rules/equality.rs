use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use crate::rules::match_case;
use prose_text::TextModel;
use prose_types::Span;
use regex::Regex;
use std::sync::LazyLock;

/// Flags gendered or otherwise non-inclusive terms and suggests
/// neutral alternatives.
///
/// Example:
///
/// ```text
/// Ask the fireman.  ->  `fireman` may be insensitive, use `firefighter` instead
/// ```
pub struct EqualityRule;

const RULE_NAME: &str = "equality";

/// Terms to flag, grouped with their neutral alternatives.
const TERMS: &[(&[&str], &[&str])] = &[
    (&["fireman", "firemen"], &["firefighter", "firefighters"]),
    (&["policeman", "policemen"], &["police officer", "police officers"]),
    (&["stewardess", "stewardesses"], &["flight attendant", "flight attendants"]),
    (&["chairman", "chairmen"], &["chairperson", "chair"]),
    (&["businessman", "businessmen"], &["businessperson", "businesspeople"]),
    (&["salesman", "salesmen"], &["salesperson", "sales representative"]),
    (&["mailman", "mailmen"], &["mail carrier", "letter carrier"]),
    (&["freshman", "freshmen"], &["first-year student", "first-year students"]),
    (&["housewife", "housewives"], &["homemaker", "homemakers"]),
    (&["mankind"], &["humankind", "humanity"]),
    (&["manpower"], &["workforce", "staff"]),
    (&["man-made"], &["artificial", "manufactured"]),
    (&["manned"], &["staffed", "crewed"]),
    (&["whitelist"], &["allowlist"]),
    (&["blacklist"], &["denylist"]),
    (&["sanity check"], &["confidence check", "coherence check"]),
    (&["crazy"], &["wild", "surprising"]),
    (&["guys"], &["folks", "everyone"]),
];

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut terms: Vec<&str> = TERMS
        .iter()
        .flat_map(|(terms, _)| terms.iter().copied())
        .collect();
    // Longest first so the alternation prefers the fuller term.
    terms.sort_by_key(|term| std::cmp::Reverse(term.len()));
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

fn alternatives_for(matched: &str) -> Option<&'static [&'static str]> {
    TERMS
        .iter()
        .find(|(terms, _)| terms.iter().any(|term| term.eq_ignore_ascii_case(matched)))
        .map(|(_, alternatives)| *alternatives)
}

impl Analyzer for EqualityRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flags non-inclusive terms and suggests neutral alternatives"
    }

    fn analyze(&self, model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
        let mut diagnostics = Vec::new();

        for found in PATTERN.find_iter(model.text()) {
            let matched = found.as_str();
            let Some(alternatives) = alternatives_for(matched) else {
                continue;
            };

            let suggestions: Vec<String> = alternatives
                .iter()
                .map(|alternative| match_case(matched, alternative))
                .collect();
            let message = format!(
                "`{matched}` may be insensitive, use `{}` instead",
                suggestions.join("`, `")
            );
            diagnostics.push(
                Diagnostic::warning(RULE_NAME, message, Span::new(found.start(), found.end()))
                    .with_suggestions(suggestions),
            );
        }

        Ok(diagnostics)
    }
}
