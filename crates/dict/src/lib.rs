//! # Prose Dictionary
//!
//! Loads a Hunspell-style dictionary pair (an `.aff` affix file plus a `.dic`
//! word list) into an in-memory lookup set and answers two questions for the
//! spelling analyzer: is this word known, and what known words are close to it.
//!
//! The affix parser covers the subset these word lists actually exercise:
//! `SFX`/`PFX` rule groups (flag, cross-product marker, strip, append,
//! condition with character classes) are expanded into concrete word forms at
//! load time; all other directives (`SET`, `TRY`, `REP`, ...) are ignored.
//! Compounding and continuation classes are out of scope.
//!
//! A loaded [`Dictionary`] is immutable. Load it once at process start and
//! share it by reference; lookups never mutate.

mod affix;
mod dictionary;
mod error;

pub use dictionary::Dictionary;
pub use error::{DictionaryError, Result};
