//! The built-in prose analyzers.
//!
//! Each rule lives in its own file and implements [`Analyzer`](crate::Analyzer).
//! Rules walk the word or sentence structure of a
//! [`TextModel`](prose_text::TextModel) and emit diagnostics whose spans
//! index the original text.

use prose_types::Span;

mod contractions;
mod equality;
mod indefinite_article;
mod passive_voice;
mod readability;
mod repeated_words;
mod sentence_spacing;
mod spelling;

pub use contractions::ContractionsRule;
pub use equality::EqualityRule;
pub use indefinite_article::IndefiniteArticleRule;
pub use passive_voice::PassiveVoiceRule;
pub use readability::ReadabilityRule;
pub use repeated_words::RepeatedWordsRule;
pub use sentence_spacing::SentenceSpacingRule;
pub use spelling::SpellingRule;

/// True when only whitespace separates two spans.
///
/// Rules that pair up neighbouring words use this to make sure no
/// punctuation sits between them.
pub(crate) fn whitespace_between(text: &str, left: Span, right: Span) -> bool {
    text[left.end..right.start].chars().all(char::is_whitespace)
}

/// Copies the leading capitalisation of `source` onto `word`.
pub(crate) fn match_case(source: &str, word: &str) -> String {
    let leading_upper = source.chars().next().is_some_and(char::is_uppercase);
    if !leading_upper {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_between() {
        let text = "one two, three";
        assert!(whitespace_between(text, Span::new(0, 3), Span::new(4, 7)));
        assert!(!whitespace_between(text, Span::new(4, 7), Span::new(9, 14)));
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Dont", "don't"), "Don't");
        assert_eq!(match_case("dont", "don't"), "don't");
        assert_eq!(match_case("a", "an"), "an");
        assert_eq!(match_case("A", "an"), "An");
    }
}
