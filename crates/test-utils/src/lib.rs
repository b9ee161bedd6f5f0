//! # Prose Test Utilities
//!
//! Shared test infrastructure for the prose linter crates: report
//! formatters for snapshot tests and ready-made text and dictionary
//! fixtures.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
//!
//! ## Quick Start
//!
//! ```ignore
//! use prose_test_utils::{format_report, fixtures};
//!
//! #[test]
//! fn test_sample_text() {
//!     let pipeline = fixtures::default_pipeline();
//!     let report = pipeline.run(fixtures::KITCHEN_SINK);
//!     insta::assert_snapshot!(format_report(&report));
//! }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::{format_diagnostics, format_report};
pub use fixtures::{test_dictionary, KITCHEN_SINK};

// Re-export insta for snapshot testing
pub use insta;
