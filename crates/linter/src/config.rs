//! Pipeline configuration.
//!
//! Resolved once at pipeline construction; never consulted again during a
//! run. An empty configuration enables every built-in analyzer at its
//! default severity, which reproduces the historical behavior of running
//! the full rule set unconditionally.

use crate::pipeline::PipelineError;
use crate::registry::RULE_NAMES;
use prose_types::RuleSeverity;
use serde::Deserialize;
use std::collections::HashMap;

/// Valid values for the `preset` key.
const PRESETS: [&str; 2] = ["recommended", "none"];

/// Configuration for a single analyzer
///
/// Supports multiple formats:
/// ```yaml
/// # Simple severity
/// passive-voice: off
///
/// # Object style with options
/// readability:
///   severity: error
///   options:
///     age: 18
///
/// # ESLint-style array: [severity, options]
/// spelling: [warn, { max: 3 }]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    /// Just a severity level (simple case)
    Severity(RuleSeverity),

    /// Detailed config with options
    Detailed {
        severity: RuleSeverity,
        options: Option<serde_json::Value>,
    },
}

impl RuleConfig {
    /// Get the severity for this rule configuration
    #[must_use]
    pub fn severity(&self) -> RuleSeverity {
        match self {
            Self::Severity(s) | Self::Detailed { severity: s, .. } => *s,
        }
    }

    /// Get the options for this rule configuration (if any)
    #[must_use]
    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Severity(_) => None,
            Self::Detailed { options, .. } => options.as_ref(),
        }
    }
}

/// Custom deserializer for `RuleConfig` to handle ESLint-style array syntax
impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, SeqAccess, Visitor};

        fn parse_severity<E: de::Error>(value: &str) -> Result<RuleSeverity, E> {
            RuleSeverity::parse(value)
                .ok_or_else(|| E::custom(format!("unknown severity: {value}")))
        }

        struct RuleConfigVisitor;

        impl<'de> Visitor<'de> for RuleConfigVisitor {
            type Value = RuleConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str(
                    "a severity string ('off', 'warn', 'error'), \
                     an array [severity, options], \
                     or an object { severity, options }",
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RuleConfig::Severity(parse_severity(value)?))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // ESLint-style: [severity, options]
                let severity: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"array with severity"))?;
                let severity = parse_severity(&severity)?;

                let options: Option<serde_json::Value> = seq.next_element()?;

                Ok(RuleConfig::Detailed { severity, options })
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Object style: { severity, options }
                #[derive(Deserialize)]
                #[serde(deny_unknown_fields)]
                struct DetailedConfig {
                    severity: String,
                    #[serde(default)]
                    options: Option<serde_json::Value>,
                }

                let config =
                    DetailedConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(RuleConfig::Detailed {
                    severity: parse_severity(&config.severity)?,
                    options: config.options,
                })
            }
        }

        deserializer.deserialize_any(RuleConfigVisitor)
    }
}

/// Overall pipeline configuration
///
/// ```yaml
/// # Everything on (same as an empty config)
/// preset: recommended
///
/// # Opt-in: only explicitly enabled rules run
/// preset: none
/// rules:
///   spelling: warn
///
/// # Default set with overrides
/// rules:
///   passive-voice: off
///   readability:
///     severity: error
///     options:
///       age: 18
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Base preset: `recommended` (default) enables every rule, `none`
    /// disables every rule not explicitly configured.
    #[serde(default)]
    pub preset: Option<String>,

    /// Per-rule overrides keyed by rule name
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl PipelineConfig {
    /// The `recommended` preset: every built-in rule at its default severity.
    #[must_use]
    pub fn recommended() -> Self {
        Self {
            preset: Some("recommended".to_string()),
            rules: HashMap::new(),
        }
    }

    /// Validate rule names and the preset against the built-in set.
    ///
    /// The error message lists valid names, with a closest-match hint for
    /// likely typos.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if let Some(preset) = &self.preset {
            if !PRESETS.contains(&preset.as_str()) {
                return Err(PipelineError::UnknownPreset {
                    preset: preset.clone(),
                });
            }
        }

        let mut invalid: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|rule| !RULE_NAMES.contains(rule))
            .collect();
        invalid.sort_unstable();

        match invalid.first() {
            None => Ok(()),
            Some(rule) => Err(PipelineError::unknown_rule(rule)),
        }
    }

    /// Whether a rule should run under this configuration.
    #[must_use]
    pub fn is_enabled(&self, rule_name: &str) -> bool {
        match self.rules.get(rule_name) {
            Some(rule) => rule.severity().is_enabled(),
            None => self.default_enabled(),
        }
    }

    /// The configured severity for a rule, if it is explicitly set.
    ///
    /// Returns `None` when the rule is not mentioned; callers fall back to
    /// the rule's default severity.
    #[must_use]
    pub fn get_severity(&self, rule_name: &str) -> Option<RuleSeverity> {
        self.rules.get(rule_name).map(RuleConfig::severity)
    }

    /// The options value configured for a rule (if any).
    #[must_use]
    pub fn get_options(&self, rule_name: &str) -> Option<&serde_json::Value> {
        self.rules.get(rule_name).and_then(RuleConfig::options)
    }

    /// Overlay `overrides` on this configuration.
    ///
    /// Rules configured in `overrides` replace this configuration's
    /// entries; its preset wins when set.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.preset.is_some() {
            self.preset = overrides.preset;
        }
        self.rules.extend(overrides.rules);
        self
    }

    /// Whether rules not mentioned in `rules` run at all.
    fn default_enabled(&self) -> bool {
        self.preset.as_deref() != Some("none")
    }
}
