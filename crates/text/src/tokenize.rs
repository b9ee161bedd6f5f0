//! Word and sentence segmentation shared by the analyzers.
//!
//! The rules here are deliberately structural, not linguistic: a word is a
//! maximal alphabetic run (apostrophes count when surrounded by letters), a
//! sentence ends at a `.`/`!`/`?` run that is followed by the start of a new
//! sentence (uppercase or digit, possibly behind opening quotes) or by the
//! end of input.

use prose_types::Span;

/// One word token: the text plus its span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// The token text.
    pub text: &'a str,
    /// Byte span of the token in the source text.
    pub span: Span,
}

/// Split text into word tokens.
///
/// A word is a run of alphabetic characters. An apostrophe (`'` or `’`)
/// joins a word when it sits between two letters, so contractions like
/// `don't` stay single tokens while trailing possessive apostrophes do not.
#[must_use]
pub fn words(text: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        let joins = c.is_alphabetic()
            || (matches!(c, '\'' | '\u{2019}')
                && start.is_some()
                && iter.peek().is_some_and(|&(_, next)| next.is_alphabetic()));

        if joins {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            out.push(Word {
                text: &text[s..i],
                span: Span::new(s, i),
            });
        }
    }

    if let Some(s) = start {
        out.push(Word {
            text: &text[s..],
            span: Span::new(s, text.len()),
        });
    }

    out
}

/// Split text into sentence spans.
///
/// A sentence runs from its first non-whitespace character through its
/// terminator run (including closing quotes and brackets). Unterminated
/// trailing text counts as a final sentence, trimmed of whitespace.
#[must_use]
pub fn sentences(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if start.is_none() {
            if !c.is_whitespace() {
                start = Some(i);
            }
            continue;
        }

        if !is_terminator(c) {
            continue;
        }

        // Absorb the whole terminator run plus any closing punctuation.
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = iter.peek() {
            if is_terminator(next) || is_closer(next) {
                end = j + next.len_utf8();
                iter.next();
            } else {
                break;
            }
        }

        if starts_new_sentence(&text[end..]) {
            if let Some(s) = start.take() {
                out.push(Span::new(s, end));
            }
        }
    }

    if let Some(s) = start {
        let end = s + text[s..].trim_end().len();
        out.push(Span::new(s, end));
    }

    out
}

const fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

const fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{2019}' | '\u{201D}')
}

/// Whether the remaining text looks like the start of a new sentence.
///
/// Keeps abbreviations like `e.g. ` from splitting mid-sentence: a split
/// only happens before an uppercase letter or digit (possibly behind
/// opening quotes), or at the end of input.
fn starts_new_sentence(rest: &str) -> bool {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return true;
    }
    let rest = rest.trim_start_matches(['"', '\'', '(', '[', '\u{2018}', '\u{201C}']);
    rest.chars()
        .next()
        .map_or(true, |c| c.is_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_texts(text: &str) -> Vec<&str> {
        words(text).into_iter().map(|w| w.text).collect()
    }

    #[test]
    fn test_words_simple() {
        let tokens = words("the quick fox");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "the");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 9));
        assert_eq!(tokens[2].span, Span::new(10, 13));
    }

    #[test]
    fn test_words_contraction_stays_single_token() {
        assert_eq!(word_texts("don't stop"), vec!["don't", "stop"]);
        assert_eq!(word_texts("It’s fine"), vec!["It’s", "fine"]);
    }

    #[test]
    fn test_words_trailing_apostrophe_excluded() {
        let tokens = words("students' books");
        assert_eq!(tokens[0].text, "students");
        assert_eq!(tokens[0].span, Span::new(0, 8));
        assert_eq!(tokens[1].text, "books");
    }

    #[test]
    fn test_words_punctuation_and_digits_split() {
        assert_eq!(word_texts("well, done."), vec!["well", "done"]);
        assert_eq!(word_texts("a1b"), vec!["a", "b"]);
    }

    #[test]
    fn test_words_word_at_end_of_text() {
        let tokens = words("end");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(0, 3));
    }

    #[test]
    fn test_words_empty() {
        assert!(words("").is_empty());
        assert!(words("  ,. !").is_empty());
    }

    #[test]
    fn test_sentences_simple() {
        let spans = sentences("One. Two.");
        assert_eq!(spans, vec![Span::new(0, 4), Span::new(5, 9)]);
    }

    #[test]
    fn test_sentences_double_space() {
        let spans = sentences("Hello.  World.");
        assert_eq!(spans, vec![Span::new(0, 6), Span::new(8, 14)]);
    }

    #[test]
    fn test_sentences_unterminated_tail() {
        let spans = sentences("He went home");
        assert_eq!(spans, vec![Span::new(0, 12)]);
    }

    #[test]
    fn test_sentences_tail_trailing_whitespace_trimmed() {
        let spans = sentences("He went home  \n");
        assert_eq!(spans, vec![Span::new(0, 12)]);
    }

    #[test]
    fn test_sentences_abbreviation_does_not_split() {
        let spans = sentences("See e.g. the appendix. Next point.");
        assert_eq!(spans, vec![Span::new(0, 22), Span::new(23, 34)]);
    }

    #[test]
    fn test_sentences_no_space_after_period() {
        let spans = sentences("errors.Another one.");
        assert_eq!(spans, vec![Span::new(0, 7), Span::new(7, 19)]);
    }

    #[test]
    fn test_sentences_ellipsis_absorbed() {
        let spans = sentences("Wait... What?");
        assert_eq!(spans, vec![Span::new(0, 7), Span::new(8, 13)]);
    }

    #[test]
    fn test_sentences_closing_quote_absorbed() {
        let spans = sentences("She said. \"Go now.\"");
        assert_eq!(spans, vec![Span::new(0, 9), Span::new(10, 19)]);
    }

    #[test]
    fn test_sentences_empty() {
        assert!(sentences("").is_empty());
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_sentences_exclamation_and_question() {
        let spans = sentences("Stop! Why? Go.");
        assert_eq!(
            spans,
            vec![Span::new(0, 5), Span::new(6, 10), Span::new(11, 14)]
        );
    }
}
