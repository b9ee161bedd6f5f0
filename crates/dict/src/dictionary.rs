//! Dictionary loading and lookups.

use crate::affix::{parse_affix_file, AffixKind, AffixRule};
use crate::error::{DictionaryError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Suggestions further than this many edits from the input are not offered.
const MAX_EDIT_DISTANCE: usize = 3;

/// A loaded word list with affix expansions applied.
///
/// Immutable after loading; share with `Arc` for concurrent lookups.
/// Word order from the `.dic` file is preserved so that suggestion ties
/// resolve deterministically.
#[derive(Debug)]
pub struct Dictionary {
    words: HashSet<String>,
    ordered: Vec<String>,
}

impl Dictionary {
    /// Load a dictionary from an affix file and a word-list file.
    pub fn load(aff_path: impl AsRef<Path>, dic_path: impl AsRef<Path>) -> Result<Self> {
        let aff = read(aff_path.as_ref())?;
        let dic = read(dic_path.as_ref())?;
        let dict = Self::from_strs(&aff, &dic)?;
        tracing::debug!(words = dict.len(), "loaded dictionary");
        Ok(dict)
    }

    /// Build a dictionary from affix and word-list file contents.
    ///
    /// Word-list lines have the form `word` or `word/FLAGS`; a leading
    /// all-digit line is treated as the conventional entry count and
    /// skipped. Every flagged affix rule that applies is expanded into a
    /// concrete word form at this point, including prefix+suffix cross
    /// products where both rules allow them.
    pub fn from_strs(aff: &str, dic: &str) -> Result<Self> {
        let rules = parse_affix_file(aff)?;
        let (suffixes, prefixes): (Vec<AffixRule>, Vec<AffixRule>) = rules
            .into_iter()
            .partition(|rule| rule.kind == AffixKind::Suffix);

        let mut dict = Self {
            words: HashSet::new(),
            ordered: Vec::new(),
        };

        let mut first_content_line = true;
        for raw in dic.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if first_content_line {
                first_content_line = false;
                if line.parse::<usize>().is_ok() {
                    continue;
                }
            }

            let Some(entry) = line.split_whitespace().next() else {
                continue;
            };
            let (word, flags) = match entry.split_once('/') {
                Some((word, flags)) => (word, flags),
                None => (entry, ""),
            };
            if word.is_empty() {
                continue;
            }

            dict.insert(word);

            let mut cross_bases = Vec::new();
            for rule in suffixes.iter().filter(|r| flags.contains(r.flag)) {
                if let Some(form) = rule.apply(word) {
                    if rule.cross_product {
                        cross_bases.push(form.clone());
                    }
                    dict.insert(&form);
                }
            }
            for rule in prefixes.iter().filter(|r| flags.contains(r.flag)) {
                if let Some(form) = rule.apply(word) {
                    dict.insert(&form);
                }
                if rule.cross_product {
                    for base in &cross_bases {
                        if let Some(form) = rule.apply(base) {
                            dict.insert(&form);
                        }
                    }
                }
            }
        }

        Ok(dict)
    }

    fn insert(&mut self, word: &str) {
        if !self.words.contains(word) {
            self.words.insert(word.to_string());
            self.ordered.push(word.to_string());
        }
    }

    /// Whether a word is known.
    ///
    /// Capitalized and all-caps forms fall back to their lowercase entry,
    /// so sentence-initial words check correctly. The reverse does not
    /// hold: a lowercase form of a proper noun stays unknown.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        if word.chars().next().is_some_and(char::is_uppercase) {
            return self.words.contains(&word.to_lowercase());
        }
        false
    }

    /// Known words close to `word`, nearest first.
    ///
    /// Ranked by Damerau-Levenshtein distance, ties broken by word-list
    /// order; at most `max` results. The casing of the input's first
    /// letter is carried onto suggestions.
    #[must_use]
    pub fn suggest(&self, word: &str, max: usize) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }
        let target = word.to_lowercase();

        let mut scored: Vec<(usize, usize)> = Vec::new();
        for (idx, candidate) in self.ordered.iter().enumerate() {
            if candidate.len().abs_diff(target.len()) > MAX_EDIT_DISTANCE {
                continue;
            }
            let distance = strsim::damerau_levenshtein(&target, &candidate.to_lowercase());
            if distance > 0 && distance <= MAX_EDIT_DISTANCE {
                scored.push((distance, idx));
            }
        }

        scored.sort_unstable();
        scored.truncate(max);
        scored
            .into_iter()
            .map(|(_, idx)| match_case(word, &self.ordered[idx]))
            .collect()
    }

    /// Number of known word forms after expansion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn match_case(original: &str, suggestion: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = suggestion.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        suggestion.to_string()
    }
}
