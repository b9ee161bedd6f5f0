use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use crate::rules::whitespace_between;
use prose_text::TextModel;

/// Flags clauses that look like passive voice.
///
/// The pattern is an auxiliary (`was`, `been`, `get` and friends),
/// optionally followed by one adverb, followed by a past participle.
/// Participles are recognised from a list of irregular forms plus the
/// regular `-ed` ending.
///
/// Example:
///
/// ```text
/// The fox was seen by the farmer.  ->  `was seen` may be passive voice
/// ```
pub struct PassiveVoiceRule;

const RULE_NAME: &str = "passive-voice";

const AUXILIARIES: &[&str] = &[
    "am", "are", "is", "was", "were", "be", "been", "being", "get", "got", "gets", "getting",
];

/// Auxiliaries that can pile onto an earlier one (`was being eaten`).
const CONTINUATIONS: &[&str] = &["been", "being"];

const ADVERB_EXCEPTIONS: &[&str] = &["not", "never", "always", "often"];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "begun", "bitten", "blown", "born", "bought", "broken", "brought", "built", "caught",
    "chosen", "done", "drawn", "driven", "eaten", "fallen", "felt", "flown", "forbidden",
    "forgotten", "found", "frozen", "given", "gone", "grown", "heard", "held", "hidden", "kept",
    "known", "left", "lost", "made", "meant", "met", "paid", "put", "read", "said", "seen",
    "sent", "shown", "sold", "spoken", "stolen", "sung", "taken", "told", "thrown", "understood",
    "won", "worn", "written",
];

fn is_in(list: &[&str], word: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(word))
}

fn is_adverb(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.ends_with("ly") || is_in(ADVERB_EXCEPTIONS, &lower)
}

fn is_participle(word: &str) -> bool {
    let lower = word.to_lowercase();
    if is_in(IRREGULAR_PARTICIPLES, &lower) {
        return true;
    }
    // Regular participles end in `-ed`; three-letter words (`red`, `wed`)
    // are never ones.
    lower.ends_with("ed") && lower.chars().count() >= 4
}

impl Analyzer for PassiveVoiceRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flags clauses that look like passive voice"
    }

    fn analyze(&self, model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
        let words = model.words();
        let mut diagnostics = Vec::new();
        let mut i = 0;

        while i < words.len() {
            if !is_in(AUXILIARIES, words[i].text) {
                i += 1;
                continue;
            }

            // Absorb stacked auxiliaries, then at most one adverb.
            let mut cursor = i;
            while cursor + 1 < words.len()
                && is_in(CONTINUATIONS, words[cursor + 1].text)
                && whitespace_between(model.text(), words[cursor].span, words[cursor + 1].span)
            {
                cursor += 1;
            }
            if cursor + 1 < words.len()
                && is_adverb(words[cursor + 1].text)
                && whitespace_between(model.text(), words[cursor].span, words[cursor + 1].span)
            {
                cursor += 1;
            }

            let participle = cursor + 1;
            if participle < words.len()
                && is_participle(words[participle].text)
                && whitespace_between(model.text(), words[cursor].span, words[participle].span)
            {
                let span = words[i].span.cover(words[participle].span);
                let clause = &model.text()[span.start..span.end];
                diagnostics.push(Diagnostic::warning(
                    RULE_NAME,
                    format!("`{clause}` may be passive voice"),
                    span,
                ));
                i = participle + 1;
            } else {
                i += 1;
            }
        }

        Ok(diagnostics)
    }
}
