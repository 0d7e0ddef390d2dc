//! Shared output formatting for lint results.

use anyhow::Result;
use infobasic_lint_core::{read_source, FailureKind, LintDiagnostic, LintResult};
use std::fmt::Write;

use crate::OutputFormat;

const RULE: usize = 70;

const NO_FILES: &str = "WARNING: No InfoBasic files found";

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

/// Nothing was checked and nothing failed.
fn is_empty_run(result: &LintResult) -> bool {
    result.files.is_empty() && result.failures.is_empty()
}

fn banner() -> String {
    "=".repeat(RULE)
}

/// Renders the human-readable report: one banner per file with issues,
/// a check mark per clean file, then the summary.
fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for failure in &result.failures {
        let _ = writeln!(out, "ERROR: {failure}");
    }

    if is_empty_run(result) {
        let _ = writeln!(out, "{NO_FILES}");
    }

    for report in &result.files {
        if report.is_clean() {
            let _ = writeln!(out, "✓ {} - No issues found", report.path.display());
            continue;
        }

        let _ = writeln!(out, "\n{}", banner());
        let _ = writeln!(out, "FILE: {}", report.path.display());
        let _ = writeln!(out, "{}", banner());

        for diagnostic in report.sorted() {
            let _ = write!(out, "\n{}", diagnostic.format());
        }
    }

    render_summary(&mut out, result);
    out
}

fn render_summary(out: &mut String, result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let warnings = warnings + usize::from(is_empty_run(result));
    let unreadable = result
        .failures
        .iter()
        .filter(|f| f.kind == FailureKind::Unreadable)
        .count();

    let _ = writeln!(out, "\n{}", banner());
    let _ = writeln!(
        out,
        "SUMMARY: {} file(s) checked",
        result.files_checked + unreadable
    );
    let _ = writeln!(out, "  Errors:   {errors}");
    let _ = writeln!(out, "  Warnings: {warnings}");
    let _ = writeln!(out, "  Infos:    {infos}");
    let _ = writeln!(out, "{}", banner());
}

fn render_json(result: &LintResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();

    for failure in &result.failures {
        let _ = writeln!(
            out,
            "{}:0: ERROR [{}] {}",
            failure.path.display(),
            failure_code(failure.kind),
            failure.message
        );
    }

    for report in &result.files {
        for diagnostic in report.sorted() {
            let _ = writeln!(
                out,
                "{}:{}: {} [{}] {}",
                report.path.display(),
                diagnostic.line_number,
                diagnostic.severity,
                diagnostic.rule_id,
                diagnostic.message,
            );
        }
    }

    out
}

fn failure_code(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::NotFound => "not-found",
        FailureKind::NotSourceFile => "not-source-file",
        FailureKind::Unreadable => "unreadable",
    }
}

fn print_pretty(result: &LintResult) {
    for failure in &result.failures {
        println!("ERROR: {failure}");
    }

    if is_empty_run(result) {
        println!("{NO_FILES}");
    }

    for report in result.files_with_issues() {
        let name = report.path.display().to_string();
        let source = match read_source(&report.path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Cannot re-read {name} for rendering: {e}");
                for diagnostic in report.sorted() {
                    print!("{}", diagnostic.format());
                }
                continue;
            }
        };

        for diagnostic in report.sorted() {
            let lint = LintDiagnostic::new(&diagnostic, &name, source.clone());
            println!("{:?}", miette::Report::new(lint));
        }
    }

    let mut summary = String::new();
    render_summary(&mut summary, result);
    print!("{summary}");
}
