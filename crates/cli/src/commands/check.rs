//! The `check` command: run the pipeline over files or stdin.

use crate::config_file;
use crate::exit_code::ExitCode;
use crate::{CheckArgs, OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use prose_dict::Dictionary;
use prose_linter::{Degradation, Pipeline, Report};
use prose_text::LineIndex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Diagnostic output structure for collecting warnings and errors
struct DiagnosticOutput {
    file_path: String,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
    message: String,
    severity: String,
    rule: String,
    suggestions: Vec<String>,
    excerpt: String,
}

/// Per-file diagnostic grouping, kept in input order
struct FileDiagnostics {
    file: String,
    errors: Vec<DiagnosticOutput>,
    warnings: Vec<DiagnosticOutput>,
    degradations: Vec<Degradation>,
}

pub fn run(config_path: Option<PathBuf>, args: &CheckArgs, output_opts: OutputOptions) -> ExitCode {
    let start_time = Instant::now();
    let human = matches!(args.format, OutputFormat::Human);

    // Resolve config, dictionary, and pipeline before touching any input
    let load_start = Instant::now();
    let loaded = match config_file::load_effective_config(config_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::ConfigError;
        }
    };

    let spinner = crate::progress::spinner(
        human && output_opts.show_progress && args.dictionary.is_some(),
        "Loading dictionary...",
    );
    let dictionary = match load_dictionary(args.dictionary.as_deref(), args.word_list.as_deref()) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::DictionaryError;
        }
    };
    spinner.finish_and_clear();

    let pipeline = match Pipeline::from_config(&loaded.config, dictionary.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return ExitCode::ConfigError;
        }
    };
    let load_duration = load_start.elapsed();

    if human && output_opts.show_info {
        if let Some(path) = &loaded.path {
            println!("{}", format!("✓ Config loaded from {}", path.display()).green());
        }
        if let Some(dictionary) = &dictionary {
            println!(
                "{}",
                format!("✓ Dictionary loaded ({} words)", dictionary.len()).green()
            );
        }
    }

    // Read every input up front so I/O failures abort before any report
    let inputs = match read_inputs(&args.paths) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            return ExitCode::IoError;
        }
    };

    let spinner = crate::progress::spinner(human && output_opts.show_progress, "Checking prose...");

    let check_start = Instant::now();
    let files: Vec<FileDiagnostics> = inputs
        .iter()
        .map(|(name, text)| {
            let report = run_pipeline(&pipeline, text, args);
            convert_report(name, &report)
        })
        .collect();

    spinner.finish_and_clear();
    let check_duration = check_start.elapsed();

    let total_warnings: usize = files.iter().map(|f| f.warnings.len()).sum();
    let total_errors: usize = files.iter().map(|f| f.errors.len()).sum();
    let total_degradations: usize = files.iter().map(|f| f.degradations.len()).sum();

    match args.format {
        OutputFormat::Human => print_human(&files),
        OutputFormat::Json => print_json(&files, total_errors, total_warnings, total_degradations),
        OutputFormat::Github => print_github(&files),
    }

    // Degraded rules go to stderr so they never mix into parseable output
    if !matches!(args.format, OutputFormat::Json) {
        for file in &files {
            for degradation in &file.degradations {
                eprintln!(
                    "{} {}: {}",
                    "warning:".yellow().bold(),
                    file.file,
                    degradation
                );
            }
        }
    }

    let total_duration = start_time.elapsed();
    if human && output_opts.show_info {
        println!();
        if total_errors == 0 && total_warnings == 0 {
            println!("{}", "✓ No prose issues found!".green().bold());
        } else if total_errors == 0 {
            println!(
                "{}",
                format!("✓ Check passed with {total_warnings} warning(s)")
                    .yellow()
                    .bold()
            );
        } else if total_warnings == 0 {
            println!("{}", format!("✗ Found {total_errors} error(s)").red());
        } else {
            println!(
                "{}",
                format!("✗ Found {total_errors} error(s) and {total_warnings} warning(s)").red()
            );
        }
        println!(
            "  {} load: {:.2}s, checking: {:.2}s, total: {:.2}s",
            "⏱".dimmed(),
            load_duration.as_secs_f64(),
            check_duration.as_secs_f64(),
            total_duration.as_secs_f64()
        );
    }

    if total_errors > 0 {
        ExitCode::LintError
    } else {
        ExitCode::Success
    }
}

/// Pick the runner variant the flags ask for.
fn run_pipeline(pipeline: &Pipeline, text: &str, args: &CheckArgs) -> Report {
    match args.timeout {
        Some(ms) => pipeline.run_parallel_within(text, Duration::from_millis(ms)),
        None if args.jobs => pipeline.run_parallel(text),
        None => pipeline.run(text),
    }
}

/// Load the Hunspell-style pair when both flags are given.
fn load_dictionary(aff: Option<&Path>, dic: Option<&Path>) -> Result<Option<Arc<Dictionary>>> {
    let (Some(aff), Some(dic)) = (aff, dic) else {
        return Ok(None);
    };

    let dictionary = Dictionary::load(aff, dic)
        .with_context(|| format!("cannot load dictionary `{}`", aff.display()))?;
    tracing::debug!(words = dictionary.len(), "dictionary loaded");
    Ok(Some(Arc::new(dictionary)))
}

/// Read every input up front; stdin when no paths are given.
fn read_inputs(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                read_stdin()
            } else {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("cannot read `{}`", path.display()))?;
                Ok((path.display().to_string(), text))
            }
        })
        .collect()
}

fn read_stdin() -> Result<(String, String)> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("cannot read stdin")?;
    Ok(("<stdin>".to_string(), text))
}

/// Flatten a report into display rows with 1-based positions.
fn convert_report(file: &str, report: &Report) -> FileDiagnostics {
    let index = LineIndex::new(report.source_text());
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in report.diagnostics() {
        let (line, column) = index.line_col(diag.span.start);
        let (end_line, end_column) = index.line_col(diag.span.end);
        let output = DiagnosticOutput {
            file_path: file.to_string(),
            // Convert from 0-based to 1-based for display
            line: line + 1,
            column: column + 1,
            end_line: end_line + 1,
            end_column: end_column + 1,
            message: diag.message.clone(),
            severity: diag.severity.to_string(),
            rule: diag.rule.clone(),
            suggestions: diag.suggestions.clone(),
            excerpt: report.excerpt(diag.span).unwrap_or_default().to_string(),
        };

        if diag.severity.is_error() {
            errors.push(output);
        } else {
            warnings.push(output);
        }
    }

    FileDiagnostics {
        file: file.to_string(),
        errors,
        warnings,
        degradations: report.degradations().to_vec(),
    }
}

fn print_human(files: &[FileDiagnostics]) {
    for file in files {
        for warning in &file.warnings {
            print_human_diagnostic(warning, false);
        }
    }
    for file in files {
        for error in &file.errors {
            print_human_diagnostic(error, true);
        }
    }
}

fn print_human_diagnostic(diag: &DiagnosticOutput, is_error: bool) {
    if is_error {
        println!(
            "\n{}:{}:{}: {} {}",
            diag.file_path,
            diag.line,
            diag.column,
            "error:".red().bold(),
            diag.message.red()
        );
    } else {
        println!(
            "\n{}:{}:{}: {} {}",
            diag.file_path,
            diag.line,
            diag.column,
            "warning:".yellow().bold(),
            diag.message.yellow()
        );
    }
    println!("  {}: {}", "rule".dimmed(), diag.rule.dimmed());
    if !diag.excerpt.is_empty() {
        println!("  {}: {}", "text".dimmed(), diag.excerpt);
    }
    if !diag.suggestions.is_empty() {
        println!(
            "  {}: {}",
            "suggestion".dimmed(),
            diag.suggestions.join(", ")
        );
    }
}

fn print_json(
    files: &[FileDiagnostics],
    total_errors: usize,
    total_warnings: usize,
    total_degradations: usize,
) {
    let diag_to_json = |d: &DiagnosticOutput| {
        serde_json::json!({
            "message": d.message,
            "severity": d.severity,
            "rule": d.rule,
            "suggestions": d.suggestions,
            "excerpt": d.excerpt,
            "location": {
                "start": { "line": d.line, "column": d.column },
                "end": { "line": d.end_line, "column": d.end_column }
            }
        })
    };

    let file_entries: Vec<serde_json::Value> = files
        .iter()
        .map(|file| {
            serde_json::json!({
                "file": file.file,
                "errors": file.errors.iter().map(diag_to_json).collect::<Vec<_>>(),
                "warnings": file.warnings.iter().map(diag_to_json).collect::<Vec<_>>(),
                "degradations": file
                    .degradations
                    .iter()
                    .map(|d| serde_json::json!({ "rule": d.rule, "reason": d.reason }))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let output = serde_json::json!({
        "success": total_errors == 0,
        "files": file_entries,
        "stats": {
            "total_files": files.len(),
            "total_errors": total_errors,
            "total_warnings": total_warnings,
            "total_degradations": total_degradations
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_github(files: &[FileDiagnostics]) {
    for file in files {
        for warning in &file.warnings {
            println!(
                "::warning file={},line={},col={}::{} [{}]",
                warning.file_path, warning.line, warning.column, warning.message, warning.rule
            );
        }
    }
    for file in files {
        for error in &file.errors {
            println!(
                "::error file={},line={},col={}::{} [{}]",
                error.file_path, error.line, error.column, error.message, error.rule
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_linter::rules::RepeatedWordsRule;
    use prose_linter::PipelineConfig;

    fn repeated_words_pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new();
        pipeline.register(Arc::new(RepeatedWordsRule), None);
        pipeline
    }

    #[test]
    fn test_convert_report_is_one_based() {
        let report = repeated_words_pipeline().run("first line\nthe the word");

        let converted = convert_report("notes.md", &report);
        assert_eq!(converted.warnings.len(), 1);
        let diag = &converted.warnings[0];
        assert_eq!(diag.file_path, "notes.md");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.column, 1);
        assert_eq!(diag.end_line, 2);
        assert_eq!(diag.end_column, 8);
        assert_eq!(diag.excerpt, "the the");
        assert_eq!(diag.severity, "warning");
    }

    #[test]
    fn test_convert_report_splits_severities() {
        let config: PipelineConfig = serde_yaml::from_str(
            "preset: none\nrules:\n  repeated-words: error\n  equality: warn\n",
        )
        .unwrap();
        let pipeline = Pipeline::from_config(&config, None).unwrap();
        let report = pipeline.run("the the fireman");

        let converted = convert_report("notes.md", &report);
        assert_eq!(converted.errors.len(), 1);
        assert_eq!(converted.errors[0].rule, "repeated-words");
        assert_eq!(converted.errors[0].severity, "error");
        assert_eq!(converted.warnings.len(), 1);
        assert_eq!(converted.warnings[0].rule, "equality");
    }

    #[test]
    fn test_convert_report_carries_degradations() {
        let config: PipelineConfig =
            serde_yaml::from_str("preset: none\nrules:\n  spelling: warn\n").unwrap();
        let pipeline = Pipeline::from_config(&config, None).unwrap();
        let report = pipeline.run("anything at all");

        let converted = convert_report("notes.md", &report);
        assert!(converted.warnings.is_empty());
        assert_eq!(converted.degradations.len(), 1);
        assert_eq!(converted.degradations[0].rule, "spelling");
    }

    #[test]
    fn test_read_inputs_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        fs::write(&path, "A quick note.").unwrap();

        let inputs = read_inputs(&[path.clone()]).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].0, path.display().to_string());
        assert_eq!(inputs[0].1, "A quick note.");
    }

    #[test]
    fn test_read_inputs_missing_file_fails() {
        let result = read_inputs(&[PathBuf::from("no/such/file.txt")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_pipeline_honors_jobs_flag() {
        let args = CheckArgs {
            paths: Vec::new(),
            format: OutputFormat::Human,
            dictionary: None,
            word_list: None,
            timeout: None,
            jobs: true,
        };

        let report = run_pipeline(&repeated_words_pipeline(), "very very good", &args);
        assert_eq!(report.diagnostics().len(), 1);
    }
}
