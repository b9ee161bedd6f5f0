use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use crate::rules::{match_case, whitespace_between};
use prose_text::TextModel;

/// Flags `a`/`an` when it disagrees with the sound of the next word.
///
/// The choice follows pronunciation, not spelling: `an hour` but
/// `a university`. Letter-pronounced initialisms like `FBI` take the
/// sound of their first letter; all-caps words with enough vowels to be
/// read as a word (`NASA`) may be pronounced either way and are left
/// alone.
///
/// Example:
///
/// ```text
/// She ate a apple.  ->  Use `an` before `apple`, not `a`
/// ```
pub struct IndefiniteArticleRule;

const RULE_NAME: &str = "indefinite-article";

/// Words whose leading `h` is silent.
const SILENT_H: &[&str] = &["heir", "honest", "honor", "honour", "hour"];

/// Vowel-spelled starts pronounced with a consonant sound (`yoo`, `wun`).
const SOUNDED_VOWEL: &[&str] = &[
    "eu", "ew", "once", "one", "uni", "usa", "use", "usu", "ute", "uto",
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// First letters whose spoken name starts with a vowel sound.
const VOWEL_SOUND_LETTERS: &[char] = &['A', 'E', 'F', 'H', 'I', 'L', 'M', 'N', 'O', 'R', 'S', 'X'];

/// The article the next word wants, or `None` when the sound is ambiguous.
fn article_for(next: &str) -> Option<&'static str> {
    let mut chars = next.chars();
    let first = chars.next()?;

    if next.len() >= 2 && next.chars().all(|c| c.is_ascii_uppercase()) {
        let vowel_count = next
            .chars()
            .filter(|c| VOWELS.contains(&c.to_ascii_lowercase()))
            .count();
        if vowel_count >= 2 {
            // Enough vowels to be read as a word (NASA) rather than spelt out.
            return None;
        }
        return if VOWEL_SOUND_LETTERS.contains(&first) {
            Some("an")
        } else {
            Some("a")
        };
    }

    let lower = next.to_lowercase();
    if SILENT_H.iter().any(|prefix| lower.starts_with(prefix)) {
        return Some("an");
    }
    if SOUNDED_VOWEL.iter().any(|prefix| lower.starts_with(prefix)) {
        return Some("a");
    }
    if VOWELS.contains(&first.to_ascii_lowercase()) {
        Some("an")
    } else {
        Some("a")
    }
}

impl Analyzer for IndefiniteArticleRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flags `a`/`an` mismatched with the sound of the following word"
    }

    fn analyze(&self, model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
        let words = model.words();
        let mut diagnostics = Vec::new();

        for pair in words.windows(2) {
            let (article, next) = (pair[0], pair[1]);
            if !article.text.eq_ignore_ascii_case("a") && !article.text.eq_ignore_ascii_case("an")
            {
                continue;
            }
            if !whitespace_between(model.text(), article.span, next.span) {
                continue;
            }
            let Some(required) = article_for(next.text) else {
                continue;
            };
            if article.text.eq_ignore_ascii_case(required) {
                continue;
            }

            let suggestion = match_case(article.text, required);
            diagnostics.push(
                Diagnostic::warning(
                    RULE_NAME,
                    format!(
                        "Use `{required}` before `{}`, not `{}`",
                        next.text, article.text
                    ),
                    article.span,
                )
                .with_suggestion(suggestion),
            );
        }

        Ok(diagnostics)
    }
}
