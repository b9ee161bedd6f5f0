//! Sample texts and dictionaries shared across test suites.

use prose_dict::Dictionary;
use prose_linter::{Pipeline, PipelineConfig};
use std::sync::Arc;

/// Prose that trips most of the built-in rules at once.
///
/// Contains a doubled word, a squashed contraction, an article mismatch,
/// a gendered term, double sentence spacing, and a passive clause.
pub const KITCHEN_SINK: &str = "The the fireman gave a apple to the clerk.  \
It was handed over without a word. We dont know why.";

/// Affix rules matching [`DIC`]: plural and past suffixes plus an
/// `re-` prefix.
pub const AFF: &str = "\
SFX S Y 1
SFX S 0 s [^s]

SFX D Y 1
SFX D 0 ed [^e]

PFX R Y 1
PFX R 0 re .
";

/// Word list for [`test_dictionary`], one root per line with optional
/// affix flags.
pub const DIC: &str = "\
18
a
an
apple/S
clerk/S
fireman
firefighter/S
gave
hand/RSD
it
know
the
to
was
we
why
without
word/S
over
";

/// A small dictionary for spelling tests, built from [`AFF`] and [`DIC`].
pub fn test_dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_strs(AFF, DIC).expect("fixture dictionary parses"))
}

/// The default pipeline with no dictionary; spelling degrades.
pub fn default_pipeline() -> Pipeline {
    Pipeline::from_config(&PipelineConfig::default(), None).expect("default config is valid")
}

/// The default pipeline with the fixture dictionary loaded.
pub fn spelling_pipeline() -> Pipeline {
    Pipeline::from_config(&PipelineConfig::default(), Some(test_dictionary()))
        .expect("default config is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dictionary_expands_affixes() {
        let dictionary = test_dictionary();
        assert!(dictionary.contains("apple"));
        assert!(dictionary.contains("apples"));
        assert!(dictionary.contains("handed"));
        assert!(dictionary.contains("rehand"));
        assert!(!dictionary.contains("winging"));
    }
}
