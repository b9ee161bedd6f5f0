use crate::analyzer::{Analyzer, AnalyzerResult};
use crate::diagnostics::Diagnostic;
use crate::rules::match_case;
use prose_text::TextModel;
use serde::Deserialize;

/// Checks apostrophe use in contractions and flags informal ones.
///
/// Two findings are possible per token:
/// - a known squashed form like `dont` is missing its apostrophe
/// - a well-formed contraction like `don't` is informal for the
///   configured register and gets its expansion suggested
///
/// Example:
///
/// ```text
/// We dont agree.     ->  Expected an apostrophe in `dont`; write `don't`
/// We don't agree.    ->  Informal contraction `don't` found; consider `do not`
/// ```
pub struct ContractionsRule;

const RULE_NAME: &str = "contractions";

/// Contractions and their formal expansions.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he's", "he is"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("mustn't", "must not"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Squashed forms that are unambiguously a contraction minus its
/// apostrophe. Forms that double as real words (`cant`, `wont`, `its`,
/// `were`, `ill`, `hell`, `shell`, `wed`, `id`, `lets`, `shed`) are left
/// to the spelling rule.
const MISSING_APOSTROPHE: &[(&str, &str)] = &[
    ("arent", "aren't"),
    ("couldnt", "couldn't"),
    ("didnt", "didn't"),
    ("doesnt", "doesn't"),
    ("dont", "don't"),
    ("hadnt", "hadn't"),
    ("hasnt", "hasn't"),
    ("havent", "haven't"),
    ("hed", "he'd"),
    ("hes", "he's"),
    ("im", "i'm"),
    ("isnt", "isn't"),
    ("ive", "i've"),
    ("mustnt", "mustn't"),
    ("shes", "she's"),
    ("shouldnt", "shouldn't"),
    ("thats", "that's"),
    ("theres", "there's"),
    ("theyd", "they'd"),
    ("theyll", "they'll"),
    ("theyre", "they're"),
    ("theyve", "they've"),
    ("wasnt", "wasn't"),
    ("werent", "weren't"),
    ("weve", "we've"),
    ("whats", "what's"),
    ("wouldnt", "wouldn't"),
    ("youd", "you'd"),
    ("youll", "you'll"),
    ("youre", "you're"),
    ("youve", "you've"),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ContractionsOptions {
    /// Contractions that are acceptable and never reported as informal.
    allow: Vec<String>,
    /// Suggest straight apostrophes (`'`) rather than typographic ones (`’`).
    straight: bool,
}

impl Default for ContractionsOptions {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            straight: true,
        }
    }
}

fn parse_options(options: Option<&serde_json::Value>) -> ContractionsOptions {
    options
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Lowercases and straightens apostrophes so table lookups see one form.
fn normalize(token: &str) -> String {
    token.to_lowercase().replace('\u{2019}', "'")
}

fn styled(word: &str, straight: bool) -> String {
    if straight {
        word.to_string()
    } else {
        word.replace('\'', "\u{2019}")
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

impl Analyzer for ContractionsRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Checks apostrophe use in contractions and flags informal ones"
    }

    fn validate_options(&self, options: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<ContractionsOptions>(options.clone())
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn analyze(&self, model: &TextModel, options: Option<&serde_json::Value>) -> AnalyzerResult {
        let options = parse_options(options);
        let allowed: Vec<String> = options.allow.iter().map(|entry| normalize(entry)).collect();
        let mut diagnostics = Vec::new();

        for word in model.words() {
            let normalized = normalize(word.text);

            if let Some(fixed) = lookup(MISSING_APOSTROPHE, &normalized) {
                let suggestion = styled(&match_case(word.text, fixed), options.straight);
                diagnostics.push(
                    Diagnostic::warning(
                        RULE_NAME,
                        format!(
                            "Expected an apostrophe in `{}`; write `{suggestion}`",
                            word.text
                        ),
                        word.span,
                    )
                    .with_suggestion(suggestion),
                );
                continue;
            }

            if let Some(expansion) = lookup(CONTRACTIONS, &normalized) {
                if allowed.contains(&normalized) {
                    continue;
                }
                let suggestion = match_case(word.text, expansion);
                diagnostics.push(
                    Diagnostic::warning(
                        RULE_NAME,
                        format!(
                            "Informal contraction `{}` found; consider `{suggestion}`",
                            word.text
                        ),
                        word.span,
                    )
                    .with_suggestion(suggestion),
                );
            }
        }

        Ok(diagnostics)
    }
}
