//! Core types for diagnostics and results.

use miette::{LabeledSpan, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity level for diagnostics.
///
/// The taxonomy is closed: rules and configuration can only pick one of
/// these three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding, does not fail the run.
    Info,
    /// Finding that should be addressed, does not fail the run.
    Warning,
    /// Finding that must be fixed; fails the run.
    Error,
}

impl Severity {
    /// Returns the uppercase name used in reports and for display ordering.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => Self::Advice,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

/// A single issue reported by a rule.
///
/// Diagnostics are flat values: they own their text and never refer back to
/// the file content they were produced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule id (e.g., "S001").
    pub rule_id: String,
    /// Name of the rule that produced this diagnostic (e.g., "structure").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Line number (1-indexed).
    pub line_number: usize,
    /// Human-readable message.
    pub message: String,
    /// The offending source line, trimmed. Empty when not applicable.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_snippet: String,
    /// Optional remediation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic without snippet or suggestion.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        line_number: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule: rule.into(),
            severity,
            line_number,
            message: message.into(),
            code_snippet: String::new(),
            suggestion: None,
        }
    }

    /// Sets the code snippet.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = snippet.into();
        self
    }

    /// Adds a suggestion to this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Formats the diagnostic for terminal output, including snippet and
    /// suggestion lines when present.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{self}\n");
        if !self.code_snippet.is_empty() {
            let _ = writeln!(output, "  Code: {}", self.code_snippet);
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  Suggestion: {suggestion}");
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] Line {} ({}): {}",
            self.severity, self.line_number, self.rule_id, self.message
        )
    }
}

/// Sorts diagnostics into display order: line ascending, then severity name
/// ascending. The sort is stable, so ties keep rule order.
pub fn sort_for_display(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.line_number
            .cmp(&b.line_number)
            .then_with(|| a.severity.as_str().cmp(b.severity.as_str()))
    });
}

/// Counts diagnostics as `(errors, warnings, infos)`.
#[must_use]
pub fn count_by_severity<'a, I>(diagnostics: I) -> (usize, usize, usize)
where
    I: IntoIterator<Item = &'a Diagnostic>,
{
    diagnostics
        .into_iter()
        .fold((0, 0, 0), |(e, w, i), d| match d.severity {
            Severity::Error => (e + 1, w, i),
            Severity::Warning => (e, w + 1, i),
            Severity::Info => (e, w, i + 1),
        })
}

/// Diagnostics produced for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the validated file.
    pub path: PathBuf,
    /// Diagnostics in rule order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Creates a report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    /// Returns true if this file has no diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Counts diagnostics by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        count_by_severity(&self.diagnostics)
    }

    /// Returns the diagnostics in display order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.clone();
        sort_for_display(&mut diagnostics);
        diagnostics
    }
}

/// Kind of caller-side failure that prevented a file from being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The path does not exist.
    NotFound,
    /// A single file was given that is not an InfoBasic source.
    NotSourceFile,
    /// The file could not be read.
    Unreadable,
}

/// A path that could not be validated. Counts as one error in the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path that failed.
    pub path: PathBuf,
    /// What went wrong.
    pub kind: FailureKind,
    /// Human-readable description.
    pub message: String,
}

impl FileFailure {
    /// Creates a new failure.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file reports, in sorted path order.
    pub files: Vec<FileReport>,
    /// Paths that could not be validated.
    pub failures: Vec<FileFailure>,
    /// Number of files the rule engine ran on.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every diagnostic of every file.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }

    /// Returns the reports that contain at least one diagnostic.
    #[must_use]
    pub fn files_with_issues(&self) -> Vec<&FileReport> {
        self.files.iter().filter(|f| !f.is_clean()).collect()
    }

    /// Returns the report for `path`, if it was checked.
    #[must_use]
    pub fn report_for(&self, path: &Path) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Counts diagnostics by severity. Each failure counts as one error.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let (errors, warnings, infos) = count_by_severity(self.diagnostics());
        (errors + self.failures.len(), warnings, infos)
    }

    /// Returns true if the run failed: any error diagnostic or any failure.
    ///
    /// Warnings and infos never fail a run.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.files.iter().any(FileReport::has_errors)
    }

    /// Checks if any diagnostic meets or exceeds the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.diagnostics().any(|d| d.severity >= severity)
    }
}

/// A [`Diagnostic`] paired with its source text for rich rendering through
/// `miette`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LintDiagnostic {
    message: String,
    rule_id: String,
    severity: Severity,
    help: Option<String>,
    src: NamedSource<String>,
    span: SourceSpan,
    label: String,
}

impl LintDiagnostic {
    /// Builds a renderable diagnostic. The span covers the trimmed text of
    /// the diagnostic's line.
    #[must_use]
    pub fn new(diagnostic: &Diagnostic, name: &str, source: String) -> Self {
        let span = line_span(&source, diagnostic.line_number);
        Self {
            message: diagnostic.message.clone(),
            rule_id: diagnostic.rule_id.clone(),
            severity: diagnostic.severity,
            help: diagnostic.suggestion.clone(),
            src: NamedSource::new(name, source),
            span,
            label: diagnostic.rule.clone(),
        }
    }

    /// Returns the span highlighted by this diagnostic.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl miette::Diagnostic for LintDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.rule_id))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity.into())
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// Byte span of the trimmed text on `line` (1-indexed).
fn line_span(source: &str, line: usize) -> SourceSpan {
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let body = text.trim_end();
            let trimmed = body.trim_start();
            let start = offset + (body.len() - trimmed.len());
            return SourceSpan::from((start, trimmed.len()));
        }
        offset += text.len();
    }
    SourceSpan::from((offset, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic(severity: Severity, line: usize) -> Diagnostic {
        Diagnostic::new("A001", "hardcoded-position", severity, line, "position detected")
    }

    // --- Diagnostic tests ---

    #[test]
    fn display_uses_bracketed_severity() {
        let d = make_diagnostic(Severity::Error, 12);
        assert_eq!(
            d.to_string(),
            "[ERROR] Line 12 (A001): position detected"
        );
    }

    #[test]
    fn format_includes_snippet_and_suggestion() {
        let d = make_diagnostic(Severity::Warning, 3)
            .with_snippet("X = R.CUST<15>")
            .with_suggestion("Use field equates");
        let formatted = d.format();
        assert!(formatted.contains("  Code: X = R.CUST<15>"));
        assert!(formatted.contains("  Suggestion: Use field equates"));
    }

    #[test]
    fn format_omits_empty_parts() {
        let formatted = make_diagnostic(Severity::Info, 1).format();
        assert!(!formatted.contains("Code:"));
        assert!(!formatted.contains("Suggestion:"));
    }

    #[test]
    fn severity_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            severity: Severity,
        }
        let parsed: Wrapper = toml::from_str("severity = \"warning\"").unwrap();
        assert_eq!(parsed.severity, Severity::Warning);
    }

    // --- Ordering tests ---

    #[test]
    fn sort_orders_by_line_then_severity_name() {
        let mut diagnostics = vec![
            make_diagnostic(Severity::Warning, 5),
            make_diagnostic(Severity::Info, 5),
            make_diagnostic(Severity::Error, 5),
            make_diagnostic(Severity::Error, 1),
        ];
        sort_for_display(&mut diagnostics);

        let order: Vec<(usize, Severity)> = diagnostics
            .iter()
            .map(|d| (d.line_number, d.severity))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, Severity::Error),
                (5, Severity::Error),
                (5, Severity::Info),
                (5, Severity::Warning),
            ]
        );
    }

    // --- LintResult tests ---

    #[test]
    fn warnings_and_infos_do_not_fail() {
        let mut result = LintResult::new();
        result.files.push(FileReport::new(
            "A.b",
            vec![
                make_diagnostic(Severity::Warning, 1),
                make_diagnostic(Severity::Info, 2),
            ],
        ));
        assert!(!result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.count_by_severity(), (0, 1, 1));
    }

    #[test]
    fn failures_count_as_errors() {
        let mut result = LintResult::new();
        result.failures.push(FileFailure::new(
            "missing.b",
            FailureKind::NotFound,
            "Path not found",
        ));
        assert!(result.has_errors());
        assert_eq!(result.count_by_severity(), (1, 0, 0));
    }

    // --- miette tests ---

    #[test]
    fn line_span_skips_indentation() {
        let source = "SUBROUTINE X\n    Y = R.CUST<15>\r\nEND\n";
        let span = line_span(source, 2);
        assert_eq!(span.offset(), 17);
        assert_eq!(span.len(), "Y = R.CUST<15>".len());
    }

    #[test]
    fn lint_diagnostic_maps_severity_and_help() {
        use miette::Diagnostic as _;

        let d = make_diagnostic(Severity::Info, 1).with_suggestion("Use equates");
        let rich = LintDiagnostic::new(&d, "X.b", "X = Y<15>\n".to_string());
        assert_eq!(rich.severity(), Some(miette::Severity::Advice));
        assert_eq!(rich.help().map(|h| h.to_string()).as_deref(), Some("Use equates"));
        assert_eq!(rich.code().map(|c| c.to_string()).as_deref(), Some("A001"));
    }
}
