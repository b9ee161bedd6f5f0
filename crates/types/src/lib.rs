//! Foundation types for the prose analyzer.
//!
//! This crate provides the shared types used across the prose analysis stack.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Position types**: [`Span`]
//! - **Severity types**: [`DiagnosticSeverity`], [`RuleSeverity`]

mod severity;
mod span;

pub use severity::{DiagnosticSeverity, RuleSeverity};
pub use span::Span;
