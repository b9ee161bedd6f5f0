//! # Prose Text Model
//!
//! This crate provides the immutable text model every analyzer reads from.
//! A [`TextModel`] wraps one input string together with a derived line index
//! so diagnostics can address exact spans and have them converted to
//! line/column positions for display.
//!
//! Spans are 0-based, end-exclusive byte ranges. Every span handed out by
//! this crate falls on `char` boundaries; [`TextModel::slice`] verifies the
//! same for spans coming back in and fails with [`OutOfRangeError`] instead
//! of clamping.
//!
//! The crate also hosts the tokenizers shared by the analyzers:
//! [`words`] (alphabetic runs with word-internal apostrophes) and
//! [`sentences`] (terminator-delimited segments).

mod line_index;
mod tokenize;

pub use line_index::LineIndex;
pub use tokenize::{sentences, words, Word};

use prose_types::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutOfRangeError>;

/// A span failed validation against the text it claims to address.
///
/// This is a programmer defect, never user input: analyzers only emit spans
/// derived from the model itself. It is surfaced loudly rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutOfRangeError {
    /// The span ends past the end of the text.
    #[error("span {span} exceeds text length {len}")]
    OutOfBounds { span: Span, len: usize },
    /// The span's start is greater than its end.
    #[error("span {span} is inverted")]
    Inverted { span: Span },
    /// One of the span's endpoints splits a multi-byte character.
    #[error("span {span} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}

/// Immutable view of one input text plus derived position index.
///
/// Constructed once per analysis run and never mutated. All analyzer
/// output spans address this instance's byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextModel {
    text: String,
    line_index: LineIndex,
}

impl TextModel {
    /// Create a text model from raw input text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self { text, line_index }
    }

    /// The full input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` for empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Extract the text a span refers to.
    ///
    /// Fails if the span is inverted, exceeds the text, or splits a
    /// multi-byte character. Never clamps.
    pub fn slice(&self, span: Span) -> Result<&str> {
        slice_of(&self.text, span)
    }

    /// Convert a byte offset to a line/column position (0-based).
    ///
    /// Columns are byte offsets within the line.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.line_index.line_col(offset)
    }

    /// The word tokens of the full text, in order.
    #[must_use]
    pub fn words(&self) -> Vec<Word<'_>> {
        words(&self.text)
    }

    /// The sentence spans of the full text, in order.
    #[must_use]
    pub fn sentences(&self) -> Vec<Span> {
        sentences(&self.text)
    }

    /// Consume the model, returning the input text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Validated slicing of arbitrary text, without building a [`TextModel`].
///
/// Same contract as [`TextModel::slice`].
pub fn slice_of(text: &str, span: Span) -> Result<&str> {
    if span.start > span.end {
        return Err(OutOfRangeError::Inverted { span });
    }
    if span.end > text.len() {
        return Err(OutOfRangeError::OutOfBounds {
            span,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
        return Err(OutOfRangeError::NotCharBoundary { span });
    }
    Ok(&text[span.start..span.end])
}
