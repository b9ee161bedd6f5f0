//! Registry of the built-in analyzers.
//!
//! Registration order is fixed here and defines the diagnostic order of
//! every report; it is never re-sorted downstream.

use crate::analyzer::Analyzer;
use crate::rules::{
    ContractionsRule, EqualityRule, IndefiniteArticleRule, PassiveVoiceRule, ReadabilityRule,
    RepeatedWordsRule, SentenceSpacingRule, SpellingRule,
};
use prose_dict::Dictionary;
use std::sync::Arc;

/// Names of the built-in analyzers, in registration order.
pub const RULE_NAMES: [&str; 8] = [
    "contractions",
    "spelling",
    "repeated-words",
    "equality",
    "indefinite-article",
    "readability",
    "sentence-spacing",
    "passive-voice",
];

/// All built-in analyzers in registration order.
///
/// The spelling analyzer needs a loaded dictionary; constructed without
/// one it reports itself unavailable at run time instead of failing here.
#[must_use]
pub fn all_analyzers(dictionary: Option<Arc<Dictionary>>) -> Vec<Arc<dyn Analyzer>> {
    vec![
        Arc::new(ContractionsRule),
        Arc::new(SpellingRule::new(dictionary)),
        Arc::new(RepeatedWordsRule),
        Arc::new(EqualityRule),
        Arc::new(IndefiniteArticleRule),
        Arc::new(ReadabilityRule),
        Arc::new(SentenceSpacingRule),
        Arc::new(PassiveVoiceRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_match_registration_order() {
        let names: Vec<&str> = all_analyzers(None).iter().map(|a| a.name()).collect();
        assert_eq!(names, RULE_NAMES);
    }

    #[test]
    fn test_all_analyzers_have_descriptions() {
        for analyzer in all_analyzers(None) {
            assert!(
                !analyzer.description().is_empty(),
                "{} has no description",
                analyzer.name()
            );
        }
    }
}
