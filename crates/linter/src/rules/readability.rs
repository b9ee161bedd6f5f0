use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use prose_text::TextModel;
use serde::Deserialize;

/// Scores each sentence with seven readability formulas and flags the
/// ones most of them agree are hard for the target reading age.
///
/// The formulas (ARI, Coleman-Liau, Flesch, Flesch-Kincaid, Gunning fog,
/// SMOG, Dale-Chall) each map a sentence to the age a reader would need
/// to follow it. A sentence is reported when at least `threshold` of
/// them put that age above `age`.
///
/// Example:
///
/// ```text
/// Organizational accountability necessitates comprehensive documentation.
///     ->  Hard to read sentence (confidence: 7/7)
/// ```
pub struct ReadabilityRule;

const RULE_NAME: &str = "readability";

const FORMULA_COUNT: usize = 7;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ReadabilityOptions {
    /// Target reading age.
    age: f64,
    /// Fraction of formulas that must agree before a sentence is flagged.
    threshold: f64,
    /// Sentences shorter than this many words are never scored.
    min_words: usize,
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            age: 16.0,
            threshold: 4.0 / 7.0,
            min_words: 5,
        }
    }
}

fn parse_options(options: Option<&serde_json::Value>) -> ReadabilityOptions {
    options
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Counts syllables by vowel groups, with a silent-`e` adjustment.
fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut previous_vowel = false;
    for c in lower.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Sentence statistics the formulas work from.
struct SentenceStats {
    words: f64,
    letters: f64,
    syllables: f64,
    polysyllables: f64,
}

/// Reading ages according to each formula, indexed like [`FORMULA_COUNT`].
///
/// Grade-level formulas are shifted by five years (first grade is age
/// six); the Flesch reading-ease score maps through `20 - ease / 10`.
fn reading_ages(stats: &SentenceStats) -> [f64; FORMULA_COUNT] {
    let w = stats.words;
    let c = stats.letters;
    let s = stats.syllables;
    let p = stats.polysyllables;

    let ari = 4.71 * (c / w) + 0.5 * w - 21.43;
    let coleman_liau = 0.0588 * (c / w * 100.0) - 0.296 * (100.0 / w) - 15.8;
    let flesch_ease = 206.835 - 1.015 * w - 84.6 * (s / w);
    let flesch_kincaid = 0.39 * w + 11.8 * (s / w) - 15.59;
    let gunning_fog = 0.4 * (w + 100.0 * (p / w));
    let smog = 1.0430 * (p * 30.0).sqrt() + 3.1291;
    let dale_chall = {
        let raw = 0.1579 * (100.0 * p / w) + 0.0496 * w;
        if p / w > 0.05 {
            raw + 3.6365
        } else {
            raw
        }
    };

    [
        ari + 5.0,
        coleman_liau + 5.0,
        20.0 - flesch_ease / 10.0,
        flesch_kincaid + 5.0,
        gunning_fog + 5.0,
        smog + 5.0,
        dale_chall + 5.0,
    ]
}

impl Analyzer for ReadabilityRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flags sentences that score as hard to read for the target age"
    }

    fn validate_options(&self, options: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<ReadabilityOptions>(options.clone())
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    #[allow(clippy::cast_precision_loss)]
    fn analyze(&self, model: &TextModel, options: Option<&serde_json::Value>) -> AnalyzerResult {
        let options = parse_options(options);
        let all_words = model.words();
        let mut diagnostics = Vec::new();

        for sentence in model.sentences() {
            let words: Vec<_> = all_words
                .iter()
                .filter(|word| word.span.start >= sentence.start && word.span.end <= sentence.end)
                .collect();
            if words.len() < options.min_words {
                continue;
            }

            let letters: usize = words
                .iter()
                .map(|word| word.text.chars().filter(|c| c.is_alphabetic()).count())
                .sum();
            let syllable_counts: Vec<usize> =
                words.iter().map(|word| syllables(word.text)).collect();
            let stats = SentenceStats {
                words: words.len() as f64,
                letters: letters as f64,
                syllables: syllable_counts.iter().sum::<usize>() as f64,
                polysyllables: syllable_counts.iter().filter(|&&n| n >= 3).count() as f64,
            };

            let hard = reading_ages(&stats)
                .iter()
                .filter(|&&age| age > options.age)
                .count();
            let confidence = hard as f64 / FORMULA_COUNT as f64;
            if confidence >= options.threshold {
                diagnostics.push(Diagnostic::warning(
                    RULE_NAME,
                    format!("Hard to read sentence (confidence: {hard}/{FORMULA_COUNT})"),
                    sentence,
                ));
            }
        }

        Ok(diagnostics)
    }
}
