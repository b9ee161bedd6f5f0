//! Affix file parsing and rule application.
//!
//! Parses the `SFX`/`PFX` groups of a Hunspell `.aff` file into concrete
//! rules and applies them to root words. Conditions support literal
//! characters, `.`, and `[...]`/`[^...]` character classes. Flags are read
//! as single characters (the default Hunspell flag type).

use crate::error::{DictionaryError, Result};

/// Where an affix attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One concrete rule line from an `SFX`/`PFX` group.
#[derive(Debug, Clone)]
pub struct AffixRule {
    pub kind: AffixKind,
    pub flag: char,
    pub cross_product: bool,
    strip: String,
    append: String,
    condition: Vec<CondPart>,
}

#[derive(Debug, Clone)]
enum CondPart {
    Any,
    Literal(char),
    Class { negated: bool, chars: Vec<char> },
}

impl CondPart {
    fn matches(&self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(l) => *l == c,
            Self::Class { negated, chars } => chars.contains(&c) != *negated,
        }
    }
}

impl AffixRule {
    /// Apply this rule to a root word, producing the affixed form.
    ///
    /// Returns `None` if the root does not satisfy the rule's strip prefix/
    /// suffix or its condition.
    pub fn apply(&self, root: &str) -> Option<String> {
        match self.kind {
            AffixKind::Suffix => {
                if !root.ends_with(&self.strip) {
                    return None;
                }
                if !condition_matches_end(&self.condition, root) {
                    return None;
                }
                let base = &root[..root.len() - self.strip.len()];
                Some(format!("{base}{}", self.append))
            }
            AffixKind::Prefix => {
                if !root.starts_with(&self.strip) {
                    return None;
                }
                if !condition_matches_start(&self.condition, root) {
                    return None;
                }
                let base = &root[self.strip.len()..];
                Some(format!("{}{base}", self.append))
            }
        }
    }
}

/// Parse the affix rules out of an `.aff` file.
///
/// Directives other than `SFX`/`PFX` are ignored. Group headers
/// (`SFX flag Y/N count`) carry the cross-product marker for their rules;
/// the declared count is not enforced, rules are recognized by shape.
pub fn parse_affix_file(contents: &str) -> Result<Vec<AffixRule>> {
    let mut rules = Vec::new();
    let mut cross_by_flag: std::collections::HashMap<char, bool> = std::collections::HashMap::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        let kind = match tokens.first() {
            Some(&"SFX") => AffixKind::Suffix,
            Some(&"PFX") => AffixKind::Prefix,
            _ => continue,
        };

        let Some(flag) = tokens.get(1).and_then(|t| t.chars().next()) else {
            continue;
        };

        if tokens.len() == 4 {
            // Group header: SFX flag cross_product count
            if tokens[3].parse::<usize>().is_err() {
                return Err(DictionaryError::MalformedAffix {
                    line,
                    message: format!("expected rule count, found `{}`", tokens[3]),
                });
            }
            cross_by_flag.insert(flag, tokens[2] == "Y");
            continue;
        }

        if tokens.len() < 5 {
            return Err(DictionaryError::MalformedAffix {
                line,
                message: format!("expected 5 fields, found {}", tokens.len()),
            });
        }

        // Appends may carry continuation flags after a slash; we only keep
        // the literal affix text.
        let append_token = match tokens[3].split_once('/') {
            Some((append, _)) => append,
            None => tokens[3],
        };

        rules.push(AffixRule {
            kind,
            flag,
            cross_product: cross_by_flag.get(&flag).copied().unwrap_or(false),
            strip: zero_is_empty(tokens[2]),
            append: zero_is_empty(append_token),
            condition: parse_condition(tokens[4]),
        });
    }

    Ok(rules)
}

fn zero_is_empty(token: &str) -> String {
    if token == "0" {
        String::new()
    } else {
        token.to_string()
    }
}

fn parse_condition(s: &str) -> Vec<CondPart> {
    let mut parts = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => parts.push(CondPart::Any),
            '[' => {
                let negated = chars.peek() == Some(&'^');
                if negated {
                    chars.next();
                }
                let mut class = Vec::new();
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                    class.push(inner);
                }
                parts.push(CondPart::Class {
                    negated,
                    chars: class,
                });
            }
            _ => parts.push(CondPart::Literal(c)),
        }
    }

    parts
}

fn condition_matches_end(parts: &[CondPart], word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < parts.len() {
        return false;
    }
    let tail = &chars[chars.len() - parts.len()..];
    parts.iter().zip(tail).all(|(part, c)| part.matches(*c))
}

fn condition_matches_start(parts: &[CondPart], word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < parts.len() {
        return false;
    }
    parts
        .iter()
        .zip(&chars[..parts.len()])
        .all(|(part, c)| part.matches(*c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_rule(aff: &str) -> AffixRule {
        let rules = parse_affix_file(aff).unwrap();
        assert_eq!(rules.len(), 1);
        rules.into_iter().next().unwrap()
    }

    #[test]
    fn test_parse_suffix_group() {
        let rules = parse_affix_file("SFX N Y 2\nSFX N 0 s .\nSFX N y ies y\n").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind, AffixKind::Suffix);
        assert_eq!(rules[0].flag, 'N');
        assert!(rules[0].cross_product);
    }

    #[test]
    fn test_cross_product_comes_from_header() {
        let rules = parse_affix_file("PFX U N 1\nPFX U 0 un .\n").unwrap();
        assert!(!rules[0].cross_product);
    }

    #[test]
    fn test_apply_plain_suffix() {
        let rule = single_rule("SFX N 0 s .");
        assert_eq!(rule.apply("word"), Some("words".to_string()));
    }

    #[test]
    fn test_apply_suffix_with_strip() {
        let rule = single_rule("SFX G e ing e");
        assert_eq!(rule.apply("make"), Some("making".to_string()));
        assert_eq!(rule.apply("jump"), None);
    }

    #[test]
    fn test_apply_suffix_condition_class() {
        let rule = single_rule("SFX S 0 s [^s]");
        assert_eq!(rule.apply("cat"), Some("cats".to_string()));
        assert_eq!(rule.apply("glass"), None);
    }

    #[test]
    fn test_apply_suffix_negated_class_with_literal() {
        // consonant + y -> ies
        let rule = single_rule("SFX Y y ies [^aeiou]y");
        assert_eq!(rule.apply("party"), Some("parties".to_string()));
        assert_eq!(rule.apply("day"), None);
    }

    #[test]
    fn test_apply_prefix() {
        let rule = single_rule("PFX U 0 un .");
        assert_eq!(rule.kind, AffixKind::Prefix);
        assert_eq!(rule.apply("happy"), Some("unhappy".to_string()));
    }

    #[test]
    fn test_condition_shorter_word_never_matches() {
        let rule = single_rule("SFX Y y ies [^aeiou]y");
        assert_eq!(rule.apply("y"), None);
    }

    #[test]
    fn test_append_continuation_flags_dropped() {
        let rule = single_rule("SFX D 0 ed/X d");
        assert_eq!(rule.apply("need"), Some("needed".to_string()));
    }

    #[test]
    fn test_non_affix_directives_ignored() {
        let rules = parse_affix_file("SET UTF-8\nTRY abc\nREP 1\nREP a b\n").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_malformed_header_count() {
        let err = parse_affix_file("SFX N Y x\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_malformed_short_rule() {
        let err = parse_affix_file("SFX N Y 1\nSFX N 0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
