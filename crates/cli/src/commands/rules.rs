//! The `rules` command: list built-in rules and their effective state.

use crate::config_file;
use crate::exit_code::ExitCode;
use crate::OutputFormat;
use colored::Colorize;
use prose_linter::{all_analyzers, PipelineConfig};
use prose_types::RuleSeverity;
use std::path::PathBuf;

/// One row of the rule listing.
struct RuleRow {
    name: &'static str,
    description: &'static str,
    /// Effective severity under the loaded config: `warning`, `error`, or `off`
    severity: String,
    enabled: bool,
}

pub fn run(config_path: Option<PathBuf>, format: OutputFormat) -> ExitCode {
    let loaded = match config_file::load_effective_config(config_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::ConfigError;
        }
    };

    let rows = rule_rows(&loaded.config);

    match format {
        OutputFormat::Json => {
            let rules: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "name": row.name,
                        "description": row.description,
                        "severity": row.severity,
                        "enabled": row.enabled,
                    })
                })
                .collect();
            let output = serde_json::json!({ "rules": rules });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
        OutputFormat::Human | OutputFormat::Github => {
            println!("{}", "Available rules:".bold());
            println!();
            for row in &rows {
                let marker = if row.enabled {
                    "✓".green()
                } else {
                    "✗".dimmed()
                };
                println!(
                    "  {} {}{}  {}",
                    marker,
                    format!("{:<22}", row.name).bold(),
                    format!("{:<8}", row.severity),
                    row.description.dimmed()
                );
            }
            println!();
            let enabled = rows.iter().filter(|row| row.enabled).count();
            println!("{} rules, {enabled} enabled", rows.len());
        }
    }

    ExitCode::Success
}

/// Resolve every built-in rule against the configuration.
fn rule_rows(config: &PipelineConfig) -> Vec<RuleRow> {
    all_analyzers(None)
        .iter()
        .map(|analyzer| {
            let name = analyzer.name();
            let enabled = config.is_enabled(name);
            let severity = if enabled {
                config
                    .get_severity(name)
                    .and_then(RuleSeverity::to_diagnostic_severity)
                    .unwrap_or_else(|| analyzer.default_severity())
                    .to_string()
            } else {
                "off".to_string()
            };

            RuleRow {
                name,
                description: analyzer.description(),
                severity,
                enabled,
            }
        })
        .collect()
}
