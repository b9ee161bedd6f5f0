//! Pipeline construction and execution.
//!
//! A [`Pipeline`] holds an ordered list of analyzer registrations and runs
//! them over a [`TextModel`], concatenating diagnostics in registration
//! order. Analyzer failures and panics are contained: they become
//! [`Degradation`] entries on the report rather than aborting the run.

use crate::analyzer::Analyzer;
use crate::config::PipelineConfig;
use crate::diagnostics::{Degradation, Diagnostic};
use crate::registry;
use crate::report::Report;
use prose_dict::Dictionary;
use prose_text::TextModel;
use prose_types::DiagnosticSeverity;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use threadpool::ThreadPool;

/// Upper bound on worker threads for parallel runs.
const MAX_WORKER_THREADS: usize = 8;

/// An error raised while constructing a pipeline.
///
/// Construction is the only fatal stage. Once a pipeline exists, running it
/// always produces a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("unknown preset `{preset}`; valid presets are `recommended` and `none`")]
    UnknownPreset { preset: String },

    #[error("{message}")]
    UnknownRule { rule: String, message: String },

    #[error("invalid options for rule `{rule}`: {message}")]
    InvalidOptions { rule: String, message: String },
}

impl PipelineError {
    pub(crate) fn unknown_rule(rule: &str) -> Self {
        use std::fmt::Write;

        let mut message = format!("unknown rule `{rule}`");
        let closest = registry::RULE_NAMES
            .iter()
            .min_by_key(|name| strsim::levenshtein(rule, name));
        if let Some(closest) = closest {
            if strsim::levenshtein(rule, closest) <= 3 {
                let _ = write!(message, "; did you mean `{closest}`?");
            }
        }
        message.push_str("\n\nValid rule names are:\n");
        for name in registry::RULE_NAMES {
            let _ = writeln!(message, "  - {name}");
        }

        Self::UnknownRule {
            rule: rule.to_string(),
            message,
        }
    }
}

/// One analyzer together with its resolved options and severity.
struct Registration {
    analyzer: Arc<dyn Analyzer>,
    options: Option<serde_json::Value>,
    severity: DiagnosticSeverity,
}

type AnalyzerOutcome = Result<Vec<Diagnostic>, Degradation>;

/// An ordered collection of analyzers that can be run over text.
#[derive(Default)]
pub struct Pipeline {
    registrations: Vec<Registration>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self
            .registrations
            .iter()
            .map(|registration| registration.analyzer.name())
            .collect();
        f.debug_struct("Pipeline").field("rules", &rules).finish()
    }
}

impl Pipeline {
    /// An empty pipeline. Running it yields a clean report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline from a configuration.
    ///
    /// Validates the configuration, instantiates the enabled built-in
    /// analyzers in registration order, resolves each one's severity and
    /// options, and rejects options the analyzer does not understand.
    pub fn from_config(
        config: &PipelineConfig,
        dictionary: Option<Arc<Dictionary>>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;

        let mut pipeline = Self::new();
        for analyzer in registry::all_analyzers(dictionary) {
            let name = analyzer.name();
            if !config.is_enabled(name) {
                tracing::trace!(rule = name, "rule disabled, skipping");
                continue;
            }

            let severity = config
                .get_severity(name)
                .and_then(prose_types::RuleSeverity::to_diagnostic_severity)
                .unwrap_or_else(|| analyzer.default_severity());
            let options = config.get_options(name).cloned();
            if let Some(value) = &options {
                analyzer
                    .validate_options(value)
                    .map_err(|message| PipelineError::InvalidOptions {
                        rule: name.to_string(),
                        message,
                    })?;
            }

            pipeline.registrations.push(Registration {
                analyzer,
                options,
                severity,
            });
        }

        tracing::debug!(analyzers = pipeline.registrations.len(), "pipeline built");
        Ok(pipeline)
    }

    /// Appends an analyzer with its default severity.
    ///
    /// Analyzers run in the order they were registered.
    pub fn register(&mut self, analyzer: Arc<dyn Analyzer>, options: Option<serde_json::Value>) {
        let severity = analyzer.default_severity();
        self.registrations.push(Registration {
            analyzer,
            options,
            severity,
        });
    }

    /// Number of registered analyzers.
    #[must_use]
    pub fn analyzer_count(&self) -> usize {
        self.registrations.len()
    }

    /// True when no analyzers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Runs every analyzer sequentially and assembles a report.
    ///
    /// Diagnostics appear in registration order. An analyzer that reports
    /// itself unavailable or panics contributes a degradation instead of
    /// aborting the run.
    #[must_use]
    #[tracing::instrument(skip(self, text), fields(analyzers = self.registrations.len(), bytes = text.len()))]
    pub fn run(&self, text: &str) -> Report {
        let model = TextModel::new(text);
        let mut diagnostics = Vec::new();
        let mut degradations = Vec::new();

        for registration in &self.registrations {
            let rule = registration.analyzer.name();
            tracing::trace!(rule, "running analyzer");
            match execute(registration, &model) {
                Ok(found) => {
                    if !found.is_empty() {
                        tracing::debug!(rule, findings = found.len(), "analyzer reported findings");
                    }
                    diagnostics.extend(found);
                }
                Err(degradation) => {
                    tracing::debug!(rule, reason = %degradation.reason, "analyzer degraded");
                    degradations.push(degradation);
                }
            }
        }

        Report::new(model.into_text(), diagnostics, degradations)
    }

    /// Runs analyzers on a thread pool and reassembles results into
    /// registration order.
    ///
    /// The report is indistinguishable from a sequential [`Pipeline::run`]
    /// over the same text and configuration.
    #[must_use]
    pub fn run_parallel(&self, text: &str) -> Report {
        self.run_parallel_impl(text, None)
    }

    /// Like [`Pipeline::run_parallel`], but bounded by a deadline.
    ///
    /// Analyzers that do not finish in time are recorded as degradations;
    /// everything that completed is kept, still in registration order.
    #[must_use]
    pub fn run_parallel_within(&self, text: &str, timeout: Duration) -> Report {
        self.run_parallel_impl(text, Some(Instant::now() + timeout))
    }

    #[tracing::instrument(skip(self, text), fields(analyzers = self.registrations.len(), bytes = text.len()))]
    fn run_parallel_impl(&self, text: &str, deadline: Option<Instant>) -> Report {
        if self.registrations.is_empty() {
            return Report::new(text.to_string(), Vec::new(), Vec::new());
        }

        let model = Arc::new(TextModel::new(text));
        let workers = self.registrations.len().min(MAX_WORKER_THREADS);
        let pool = ThreadPool::new(workers);
        let (sender, receiver) = crossbeam_channel::unbounded::<(usize, AnalyzerOutcome)>();

        for (index, registration) in self.registrations.iter().enumerate() {
            let sender = sender.clone();
            let model = Arc::clone(&model);
            let analyzer = Arc::clone(&registration.analyzer);
            let options = registration.options.clone();
            let severity = registration.severity;
            pool.execute(move || {
                let registration = Registration {
                    analyzer,
                    options,
                    severity,
                };
                let outcome = execute(&registration, &model);
                // The receiver is gone once the deadline has passed.
                let _ = sender.send((index, outcome));
            });
        }
        drop(sender);

        let mut slots: Vec<Option<AnalyzerOutcome>> = std::iter::repeat_with(|| None)
            .take(self.registrations.len())
            .collect();
        let mut filled = 0;

        while filled < slots.len() {
            let received = match deadline {
                Some(deadline) => receiver.recv_deadline(deadline).ok(),
                None => receiver.recv().ok(),
            };
            let Some((index, outcome)) = received else {
                break;
            };
            if slots[index].is_none() {
                filled += 1;
            }
            slots[index] = Some(outcome);
        }

        let mut diagnostics = Vec::new();
        let mut degradations = Vec::new();
        for (slot, registration) in slots.into_iter().zip(&self.registrations) {
            match slot {
                Some(Ok(found)) => diagnostics.extend(found),
                Some(Err(degradation)) => degradations.push(degradation),
                None => {
                    let rule = registration.analyzer.name();
                    tracing::debug!(rule, "analyzer missed the run deadline");
                    degradations.push(Degradation::new(
                        rule,
                        "did not complete before the run deadline",
                    ));
                }
            }
        }

        Report::new(text.to_string(), diagnostics, degradations)
    }
}

/// Runs a single analyzer, containing failures and panics.
fn execute(registration: &Registration, model: &TextModel) -> AnalyzerOutcome {
    let name = registration.analyzer.name();
    let caught = catch_unwind(AssertUnwindSafe(|| {
        registration
            .analyzer
            .analyze(model, registration.options.as_ref())
    }));

    match caught {
        Ok(Ok(mut diagnostics)) => {
            for diagnostic in &mut diagnostics {
                diagnostic.severity = registration.severity;
            }
            Ok(diagnostics)
        }
        Ok(Err(unavailable)) => Err(Degradation::new(name, unavailable.reason)),
        Err(payload) => Err(Degradation::new(name, panic_reason(&*payload))),
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match detail {
        Some(detail) => format!("panicked: {detail}"),
        None => "panicked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerResult, AnalyzerUnavailable};
    use prose_types::Span;

    struct FixedRule {
        name: &'static str,
        spans: Vec<Span>,
    }

    impl Analyzer for FixedRule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "emits a fixed set of diagnostics"
        }

        fn analyze(&self, _model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
            Ok(self
                .spans
                .iter()
                .map(|span| Diagnostic::warning(self.name, "finding", *span))
                .collect())
        }
    }

    struct PanickingRule;

    impl Analyzer for PanickingRule {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn description(&self) -> &'static str {
            "always panics"
        }

        fn analyze(&self, _model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
            panic!("boom");
        }
    }

    struct UnavailableRule;

    impl Analyzer for UnavailableRule {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        fn description(&self) -> &'static str {
            "always degrades"
        }

        fn analyze(&self, _model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
            Err(AnalyzerUnavailable::new("resource missing"))
        }
    }

    struct SlowRule {
        delay: Duration,
    }

    impl Analyzer for SlowRule {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn description(&self) -> &'static str {
            "sleeps before answering"
        }

        fn analyze(&self, _model: &TextModel, _options: Option<&serde_json::Value>) -> AnalyzerResult {
            std::thread::sleep(self.delay);
            Ok(vec![Diagnostic::warning("slow", "late finding", Span::new(0, 1))])
        }
    }

    #[test]
    fn test_empty_pipeline_produces_clean_report() {
        let report = Pipeline::new().run("Some text.");
        assert!(report.is_clean());
        assert_eq!(report.source_text(), "Some text.");
    }

    #[test]
    fn test_diagnostics_follow_registration_order() {
        let mut pipeline = Pipeline::new();
        pipeline.register(
            Arc::new(FixedRule {
                name: "second-to-none",
                spans: vec![Span::new(5, 6)],
            }),
            None,
        );
        pipeline.register(
            Arc::new(FixedRule {
                name: "earlier-span",
                spans: vec![Span::new(0, 1)],
            }),
            None,
        );

        let report = pipeline.run("abcdefgh");
        let rules: Vec<&str> = report.diagnostics().iter().map(|d| d.rule.as_str()).collect();
        // Registration order wins even though the second rule's span starts first.
        assert_eq!(rules, ["second-to-none", "earlier-span"]);
    }

    #[test]
    fn test_panicking_analyzer_is_contained() {
        let mut pipeline = Pipeline::new();
        pipeline.register(Arc::new(PanickingRule), None);
        pipeline.register(
            Arc::new(FixedRule {
                name: "survivor",
                spans: vec![Span::new(0, 4)],
            }),
            None,
        );

        let report = pipeline.run("text");
        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(report.diagnostics()[0].rule, "survivor");
        assert_eq!(report.degradations().len(), 1);
        assert_eq!(report.degradations()[0].rule, "panicking");
        assert_eq!(report.degradations()[0].reason, "panicked: boom");
    }

    #[test]
    fn test_unavailable_analyzer_degrades() {
        let mut pipeline = Pipeline::new();
        pipeline.register(Arc::new(UnavailableRule), None);

        let report = pipeline.run("text");
        assert!(report.diagnostics().is_empty());
        assert_eq!(report.degradations().len(), 1);
        assert_eq!(report.degradations()[0].reason, "resource missing");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut pipeline = Pipeline::new();
        for (name, start) in [("alpha", 0), ("beta", 2), ("gamma", 4)] {
            pipeline.register(
                Arc::new(FixedRule {
                    name,
                    spans: vec![Span::new(start, start + 1)],
                }),
                None,
            );
        }

        let text = "parallel and sequential agree";
        let sequential = pipeline.run(text);
        let parallel = pipeline.run_parallel(text);
        assert_eq!(sequential.diagnostics(), parallel.diagnostics());
        assert_eq!(sequential.degradations(), parallel.degradations());
    }

    #[test]
    fn test_deadline_degrades_slow_analyzer() {
        let mut pipeline = Pipeline::new();
        pipeline.register(
            Arc::new(SlowRule {
                delay: Duration::from_secs(10),
            }),
            None,
        );
        pipeline.register(
            Arc::new(FixedRule {
                name: "fast",
                spans: vec![Span::new(0, 1)],
            }),
            None,
        );

        let report = pipeline.run_parallel_within("text", Duration::from_millis(200));
        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(report.diagnostics()[0].rule, "fast");
        assert_eq!(report.degradations().len(), 1);
        assert_eq!(report.degradations()[0].rule, "slow");
        assert_eq!(
            report.degradations()[0].reason,
            "did not complete before the run deadline"
        );
    }

    #[test]
    fn test_from_config_rejects_unknown_rule() {
        let config: PipelineConfig = serde_json::from_str(r#"{"rules": {"speling": "error"}}"#)
            .expect("config parses");
        let err = Pipeline::from_config(&config, None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown rule `speling`"), "{message}");
        assert!(message.contains("did you mean `spelling`"), "{message}");
    }

    #[test]
    fn test_from_config_rejects_invalid_options() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{"rules": {"sentence-spacing": ["warn", {"spaces": 2}]}}"#,
        )
        .expect("config parses");
        let err = Pipeline::from_config(&config, None).unwrap_err();
        match err {
            PipelineError::InvalidOptions { rule, .. } => assert_eq!(rule, "sentence-spacing"),
            other => panic!("expected InvalidOptions, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_skips_disabled_rules() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"rules": {"readability": "off"}}"#).expect("config parses");
        let pipeline = Pipeline::from_config(&config, None).expect("pipeline builds");
        assert_eq!(pipeline.analyzer_count(), registry::RULE_NAMES.len() - 1);
    }

    #[test]
    fn test_severity_override_applies_to_diagnostics() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"rules": {"repeated-words": "error"}}"#)
                .expect("config parses");
        let pipeline = Pipeline::from_config(&config, None).expect("pipeline builds");

        let report = pipeline.run("the the quick fox");
        let repeated: Vec<_> = report
            .diagnostics()
            .iter()
            .filter(|d| d.rule == "repeated-words")
            .collect();
        assert_eq!(repeated.len(), 1);
        assert_eq!(repeated[0].severity, DiagnosticSeverity::Error);
    }

    #[test]
    fn test_preset_none_builds_empty_pipeline() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"preset": "none"}"#).expect("config parses");
        let pipeline = Pipeline::from_config(&config, None).expect("pipeline builds");
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = PipelineConfig::default();
        let pipeline = Pipeline::from_config(&config, None).expect("pipeline builds");
        let text = "The the fox. A apple fell.  It was eaten.";

        let first = pipeline.run(text);
        let second = pipeline.run(text);
        assert_eq!(first.diagnostics(), second.diagnostics());
        assert_eq!(first.degradations(), second.degradations());
    }
}
