//! # Prose Linter
//!
//! The diagnostic pipeline at the heart of the prose analyzer. A
//! [`Pipeline`] holds an ordered list of analyzers, runs each against the
//! same immutable [`prose_text::TextModel`], and merges their findings into
//! one [`Report`] whose diagnostic order is always registration order.
//!
//! Analyzers are isolated from each other: one analyzer failing (or
//! panicking) is recorded as a [`Degradation`] on the report and never
//! aborts the run or disturbs sibling analyzers.
//!
//! ```rust
//! use prose_linter::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::from_config(&PipelineConfig::default(), None)?;
//! let report = pipeline.run("The the quick fox.");
//! assert_eq!(report.diagnostics().len(), 1);
//! # Ok::<(), prose_linter::PipelineError>(())
//! ```

mod analyzer;
mod config;
mod diagnostics;
mod pipeline;
mod registry;
mod report;
pub mod rules;

pub use analyzer::{Analyzer, AnalyzerResult, AnalyzerUnavailable};
pub use config::{PipelineConfig, RuleConfig};
pub use diagnostics::{Degradation, Diagnostic};
pub use pipeline::{Pipeline, PipelineError};
pub use registry::{all_analyzers, RULE_NAMES};
pub use report::Report;
