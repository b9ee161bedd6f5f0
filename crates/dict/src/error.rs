//! Error types for dictionary loading.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Errors that can occur while loading a dictionary pair.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Reading the affix or word-list file failed.
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `SFX`/`PFX` line in the affix file could not be parsed.
    #[error("malformed affix rule on line {line}: {message}")]
    MalformedAffix { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_affix_display() {
        let err = DictionaryError::MalformedAffix {
            line: 7,
            message: "expected rule count".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed affix rule on line 7: expected rule count"
        );
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = DictionaryError::Io {
            path: PathBuf::from("/tmp/en.aff"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("/tmp/en.aff"));
    }
}
